use crate::config::Config;
use crate::core::analysis::{
    AnalysisResult, detect_rate_analysis, performance_analysis, position_analysis,
    used_vs_recovered_analysis, wrms_analysis,
};
use crate::core::bundle::{ReportBundle, Section, SessionTable};
use crate::core::problems::extract_problems;
use crate::db::schema::SESSION_COLUMNS;
use crate::errors::{AppError, AppResult};
use crate::models::{Band, Coord, SessionRecord};
use crate::utils::date::{DateRange, fractional_year};
use crate::utils::fmt_value;
use crate::utils::stats::nansum;
use tracing::debug;

/// Columns left out of the session table.
pub const TABLE_DROPPED_COLUMNS: [&str; 6] = [
    "Notes",
    "Date_MJD",
    "Pos_X",
    "Pos_Y",
    "Pos_Z",
    "Performance_UsedVsRecov",
];

/// Knobs of the summary that come from the configuration file.
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    pub problem_keywords: Vec<String>,
    pub wrap_width: usize,
}

impl From<&Config> for SummaryOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            problem_keywords: cfg.problem_keywords.clone(),
            wrap_width: cfg.wrap_width,
        }
    }
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Everything a station report shows, computed once from the query rows.
#[derive(Clone)]
pub struct StationSummary {
    pub station: String,
    pub range: DateRange,
    pub total_sessions: usize,
    pub total_observations: i64,
    pub wrms: AnalysisResult,
    pub performance: AnalysisResult,
    pub used_vs_recovered: AnalysisResult,
    pub detect_x: AnalysisResult,
    pub detect_s: AnalysisResult,
    /// E, N, U, X, Y, Z in that order.
    pub positions: Vec<(Coord, AnalysisResult)>,
    pub problems: Vec<Vec<String>>,
    pub table: SessionTable,
}

impl StationSummary {
    pub fn build(
        station: &str,
        range: DateRange,
        records: &[SessionRecord],
        opts: &SummaryOptions,
    ) -> AppResult<Self> {
        if records.is_empty() {
            return Err(AppError::NoSessions {
                station: station.to_string(),
                range: range.to_string(),
            });
        }

        debug!(
            start = %fractional_year(range.start),
            stop = %fractional_year(range.stop),
            "fractional year range"
        );

        let total_observations = nansum(records.iter().map(|r| r.total_obs)) as i64;

        let positions = [Coord::E, Coord::N, Coord::U, Coord::X, Coord::Y, Coord::Z]
            .into_iter()
            .map(|c| (c, position_analysis(records, c)))
            .collect();

        Ok(Self {
            station: station.to_string(),
            range,
            total_sessions: records.len(),
            total_observations,
            wrms: wrms_analysis(records),
            performance: performance_analysis(records),
            used_vs_recovered: used_vs_recovered_analysis(records),
            detect_x: detect_rate_analysis(records, Band::X),
            detect_s: detect_rate_analysis(records, Band::S),
            positions,
            problems: extract_problems(records, &opts.problem_keywords, opts.wrap_width),
            table: session_table(records),
        })
    }

    pub fn title(&self) -> String {
        format!(
            "{} station report ({} - {})",
            self.station,
            self.range.start_iso(),
            self.range.stop_iso()
        )
    }

    pub fn intro_text(&self) -> String {
        format!(
            "{} data extracted for time range: {} through {}",
            self.station,
            self.range.start_iso(),
            self.range.stop_iso()
        )
    }

    pub fn sessions_text(&self) -> String {
        format!(
            "Total number of {} sessions found in database for this time range: {}",
            self.station, self.total_sessions
        )
    }

    pub fn observations_text(&self) -> String {
        format!(
            "Total number of {} observations across all sessions in this time range: {}",
            self.station, self.total_observations
        )
    }

    /// Lines printed under the PDF title.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![self.sessions_text(), self.observations_text()];
        lines.extend(self.wrms.text.clone());
        lines.extend(self.performance.text.clone());
        lines
    }

    pub fn position(&self, coord: Coord) -> Option<&AnalysisResult> {
        self.positions.iter().find(|(c, _)| *c == coord).map(|(_, a)| a)
    }

    /// Problem entries flattened to printable lines.
    pub fn problem_lines(&self) -> Vec<String> {
        self.problems.iter().flatten().cloned().collect()
    }

    pub fn to_bundle(&self) -> AppResult<ReportBundle> {
        let mut b = ReportBundle::new(&self.title());

        b.insert("intro", Section::Text(self.intro_text()));
        b.insert("total_sessions", Section::Text(self.sessions_text()));
        b.insert("total_observations", Section::Text(self.observations_text()));
        b.insert(
            "fractional_range",
            Section::Text(format!(
                "Fractional year range: {} - {}",
                fractional_year(self.range.start),
                fractional_year(self.range.stop)
            )),
        );

        let analyses = [
            ("wrms", "Station W.RMS vs. Time", &self.wrms),
            ("performance", "Performance (used/scheduled) vs. Time", &self.performance),
            ("used_vs_recov", "Used/Recovered observations vs. Time", &self.used_vs_recovered),
            ("detect_x", "X-band detection ratio", &self.detect_x),
            ("detect_s", "S-band detection ratio", &self.detect_s),
        ];
        for (key, caption, a) in analyses {
            if let Some(text) = &a.text {
                b.insert(&format!("{key}_text"), Section::Text(text.clone()));
            }
            b.insert(&format!("{key}_img"), Section::image(caption, &a.chart)?);
        }

        for (coord, a) in &self.positions {
            let c = coord.as_str();
            b.insert(
                &format!("{c}_pos_img"),
                Section::image(&format!("{c} position vs. Time"), &a.chart)?,
            );
        }

        b.insert("problems", Section::Lines(self.problems.iter().map(|p| p.join(" ")).collect()));
        b.insert("table_data", Section::Table(self.table.clone()));

        Ok(b)
    }
}

fn cell(v: Option<f64>) -> String {
    v.map(fmt_value).unwrap_or_default()
}

/// Session rows without the note, MJD, geocentric position and
/// used/recovered columns.
pub fn session_table(records: &[SessionRecord]) -> SessionTable {
    let headers: Vec<String> = SESSION_COLUMNS
        .iter()
        .filter(|c| !TABLE_DROPPED_COLUMNS.contains(*c))
        .map(|c| c.to_string())
        .collect();

    let rows = records
        .iter()
        .map(|r| {
            headers
                .iter()
                .map(|h| match h.as_str() {
                    "ExpID" => r.exp_id.clone(),
                    "Date" => r.date.format("%Y-%m-%d %H:%M:%S").to_string(),
                    "Performance" => cell(r.performance),
                    "session_fit" => cell(r.session_fit),
                    "W_RMS_del" => cell(r.w_rms_del),
                    "Detect_Rate_X" => cell(r.detect_rate_x),
                    "Detect_Rate_S" => cell(r.detect_rate_s),
                    "Total_Obs" => r.total_obs.map(|v| format!("{}", v as i64)).unwrap_or_default(),
                    "Pos_E" => cell(r.pos_e),
                    "Pos_N" => cell(r.pos_n),
                    "Pos_U" => cell(r.pos_u),
                    _ => String::new(),
                })
                .collect()
        })
        .collect();

    SessionTable { headers, rows }
}
