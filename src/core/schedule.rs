//! Schedule statistics: sessions, scans and observations per observing
//! program, as planned by the scheduling API.

use crate::api::{ApiTable, StationApi, StationResponse};
use crate::chart::PieChart;
use crate::errors::AppResult;
use crate::models::{ScheduledSession, StatKind};
use crate::ui::messages::warning;
use crate::utils::capitalize;
use crate::utils::date::{DateRange, doy_label, parse_timestamp};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Station codes are capitalised for the API (`nn` -> `Nn`).
pub fn station_code_for_api(station: &str) -> String {
    capitalize(station)
}

/// Shape the station endpoint's session table.
///
/// Rows without a program are dropped (they never show in a grouping);
/// rows with an unreadable start time are dropped with a warning.
pub fn scheduled_sessions(resp: &StationResponse) -> AppResult<Vec<ScheduledSession>> {
    let t = &resp.sessions;
    let id_col = t.column("session_id")?;
    let program_col = t.column("program")?;
    let start_col = t.column("time_start")?;

    let mut out = Vec::with_capacity(t.len());
    for i in 0..t.len() {
        let Some(session_id) = t.str_at(i, id_col) else {
            continue;
        };
        let Some(program) = t.str_at(i, program_col) else {
            continue;
        };
        let Some(time_start) = t.str_at(i, start_col).as_deref().and_then(parse_timestamp) else {
            warn!(%session_id, "unreadable time_start, session skipped");
            continue;
        };
        out.push(ScheduledSession {
            session_id,
            program,
            time_start,
            scans: None,
            observations: None,
        });
    }

    debug!(rows = t.len(), kept = out.len(), "scheduled sessions");
    Ok(out)
}

/// Inner join of the statistics rows with the sessions on `session_id`.
pub fn join_statistics(sessions: &[ScheduledSession], stats: &ApiTable) -> AppResult<Vec<ScheduledSession>> {
    let id_col = stats.column("session_id")?;
    let scans_col = stats.column("scans")?;
    let obs_col = stats.column("observations")?;

    let mut by_id: HashMap<&str, Vec<&ScheduledSession>> = HashMap::new();
    for s in sessions {
        by_id.entry(s.session_id.as_str()).or_default().push(s);
    }

    let mut joined = Vec::new();
    for i in 0..stats.len() {
        let Some(id) = stats.str_at(i, id_col) else {
            continue;
        };
        for s in by_id.get(id.as_str()).into_iter().flatten() {
            joined.push(ScheduledSession {
                scans: stats.f64_at(i, scans_col),
                observations: stats.f64_at(i, obs_col),
                ..(*s).clone()
            });
        }
    }

    debug!(sessions = sessions.len(), stats = stats.len(), joined = joined.len(), "joined statistics");
    Ok(joined)
}

/// Sessions starting inside the range (both endpoints included).
pub fn filter_range(sessions: &[ScheduledSession], range: &DateRange) -> Vec<ScheduledSession> {
    sessions
        .iter()
        .filter(|s| range.contains(s.time_start))
        .cloned()
        .collect()
}

/// Per-program session count, or per-program sum of scans/observations.
pub fn group_by_program(rows: &[ScheduledSession], kind: StatKind) -> BTreeMap<String, f64> {
    let mut groups: BTreeMap<String, f64> = BTreeMap::new();
    for r in rows {
        let value = match kind {
            StatKind::Sessions => 1.0,
            StatKind::Scans => r.scans.filter(|v| !v.is_nan()).unwrap_or(0.0),
            StatKind::Observations => r.observations.filter(|v| !v.is_nan()).unwrap_or(0.0),
        };
        *groups.entry(r.program.clone()).or_insert(0.0) += value;
    }
    groups
}

pub fn chart_title(kind: StatKind, station: &str, range: &DateRange) -> String {
    format!(
        "{} Distribution for {} ({} to {})",
        kind.title(),
        station,
        doy_label(range.start),
        doy_label(range.stop)
    )
}

pub fn output_file_name(kind: StatKind, station: &str) -> String {
    let st = station.to_lowercase();
    match kind {
        StatKind::Sessions => format!("{st}_session_piechart.png"),
        other => format!("{st}_yearly_{}.png", other.as_str()),
    }
}

pub fn build_pie(kind: StatKind, station: &str, range: &DateRange, groups: &BTreeMap<String, f64>) -> PieChart {
    PieChart::new(
        &chart_title(kind, station, range),
        groups.keys().cloned().collect(),
        groups.values().copied().collect(),
    )
}

/// One schedule chart, ready to render.
#[derive(Debug, Clone)]
pub struct ScheduleChart {
    pub kind: StatKind,
    pub file_name: String,
    pub pie: PieChart,
}

/// Fetch, shape, filter and group the schedule data for every requested
/// kind. Statistics are only fetched when scans or observations are asked
/// for. Kinds with nothing in range are skipped.
pub fn run_schedule(
    api: &dyn StationApi,
    station: &str,
    range: &DateRange,
    kinds: &[StatKind],
) -> AppResult<Vec<ScheduleChart>> {
    let code = station_code_for_api(station);

    let sessions = scheduled_sessions(&api.station(&code)?)?;
    let joined = if kinds.iter().any(StatKind::needs_statistics) {
        let stats = api.station_stats(&code)?;
        Some(join_statistics(&sessions, &stats)?)
    } else {
        None
    };

    let mut charts = Vec::new();
    for &kind in kinds {
        let source = match (&joined, kind.needs_statistics()) {
            (Some(j), true) => j.as_slice(),
            _ => sessions.as_slice(),
        };
        let groups = group_by_program(&filter_range(source, range), kind);

        if groups.is_empty() || groups.values().sum::<f64>() <= 0.0 {
            warning(format!(
                "No {} scheduled for {} between {} and {}; chart skipped.",
                kind.as_str(),
                code,
                range.start_iso(),
                range.stop_iso()
            ));
            continue;
        }

        charts.push(ScheduleChart {
            kind,
            file_name: output_file_name(kind, &code),
            pie: build_pie(kind, &code, range, &groups),
        });
    }

    Ok(charts)
}
