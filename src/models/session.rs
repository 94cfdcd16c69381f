use chrono::NaiveDateTime;
use serde::Serialize;

/// One row of a station table: a single correlated session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRecord {
    #[serde(rename = "ExpID")]
    pub exp_id: String,
    #[serde(rename = "Date")]
    pub date: NaiveDateTime,
    #[serde(rename = "Date_MJD")]
    pub date_mjd: f64,
    #[serde(rename = "Performance")]
    pub performance: Option<f64>,
    #[serde(rename = "Performance_UsedVsRecov")]
    pub performance_used_vs_recov: Option<f64>,
    #[serde(rename = "session_fit")]
    pub session_fit: Option<f64>,
    #[serde(rename = "W_RMS_del")]
    pub w_rms_del: Option<f64>,
    #[serde(rename = "Detect_Rate_X")]
    pub detect_rate_x: Option<f64>,
    #[serde(rename = "Detect_Rate_S")]
    pub detect_rate_s: Option<f64>,
    #[serde(rename = "Total_Obs")]
    pub total_obs: Option<f64>,
    #[serde(rename = "Notes")]
    pub notes: Option<String>,
    #[serde(rename = "Pos_X")]
    pub pos_x: Option<f64>,
    #[serde(rename = "Pos_Y")]
    pub pos_y: Option<f64>,
    #[serde(rename = "Pos_Z")]
    pub pos_z: Option<f64>,
    #[serde(rename = "Pos_E")]
    pub pos_e: Option<f64>,
    #[serde(rename = "Pos_N")]
    pub pos_n: Option<f64>,
    #[serde(rename = "Pos_U")]
    pub pos_u: Option<f64>,
}

/// Observing band of a detection rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    X,
    S,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::X => "X",
            Band::S => "S",
        }
    }
}

/// Position component: geocentric X/Y/Z or local E/N/U.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coord {
    X,
    Y,
    Z,
    E,
    N,
    U,
}

impl Coord {
    pub fn as_str(&self) -> &'static str {
        match self {
            Coord::X => "X",
            Coord::Y => "Y",
            Coord::Z => "Z",
            Coord::E => "E",
            Coord::N => "N",
            Coord::U => "U",
        }
    }
}

/// A numeric column of [`SessionRecord`] that the report analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    WRms,
    SessionFit,
    Performance,
    UsedVsRecovered,
    DetectRate(Band),
    Position(Coord),
}

impl Metric {
    /// Database column backing the metric.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::WRms => "W_RMS_del",
            Metric::SessionFit => "session_fit",
            Metric::Performance => "Performance",
            Metric::UsedVsRecovered => "Performance_UsedVsRecov",
            Metric::DetectRate(Band::X) => "Detect_Rate_X",
            Metric::DetectRate(Band::S) => "Detect_Rate_S",
            Metric::Position(Coord::X) => "Pos_X",
            Metric::Position(Coord::Y) => "Pos_Y",
            Metric::Position(Coord::Z) => "Pos_Z",
            Metric::Position(Coord::E) => "Pos_E",
            Metric::Position(Coord::N) => "Pos_N",
            Metric::Position(Coord::U) => "Pos_U",
        }
    }

    /// Value the database uses for "no data" in this column.
    ///
    /// Delay residuals use -999; ratios and positions use 0. NULL is
    /// always "no data".
    pub fn sentinel(&self) -> f64 {
        match self {
            Metric::WRms | Metric::SessionFit => -999.0,
            _ => 0.0,
        }
    }
}

impl SessionRecord {
    pub fn metric(&self, m: Metric) -> Option<f64> {
        match m {
            Metric::WRms => self.w_rms_del,
            Metric::SessionFit => self.session_fit,
            Metric::Performance => self.performance,
            Metric::UsedVsRecovered => self.performance_used_vs_recov,
            Metric::DetectRate(Band::X) => self.detect_rate_x,
            Metric::DetectRate(Band::S) => self.detect_rate_s,
            Metric::Position(Coord::X) => self.pos_x,
            Metric::Position(Coord::Y) => self.pos_y,
            Metric::Position(Coord::Z) => self.pos_z,
            Metric::Position(Coord::E) => self.pos_e,
            Metric::Position(Coord::N) => self.pos_n,
            Metric::Position(Coord::U) => self.pos_u,
        }
    }

    /// The metric value, or `None` when the row holds the sentinel or NULL.
    pub fn valid_metric(&self, m: Metric) -> Option<f64> {
        self.metric(m)
            .filter(|v| !v.is_nan() && *v != m.sentinel())
    }

    /// Note text, `None` when empty.
    pub fn note(&self) -> Option<&str> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}
