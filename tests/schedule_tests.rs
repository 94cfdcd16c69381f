mod common;
use common::{STATION_JSON, STATS_JSON, write_api_fixtures};
use std::path::PathBuf;
use vlbisummary::api::{ApiTable, FileApi, StationResponse};
use vlbisummary::core::schedule::{
    chart_title, filter_range, group_by_program, join_statistics, output_file_name, run_schedule,
    scheduled_sessions, station_code_for_api,
};
use vlbisummary::errors::AppError;
use vlbisummary::models::StatKind;
use vlbisummary::utils::date::DateRange;

fn station() -> StationResponse {
    serde_json::from_str(STATION_JSON).unwrap()
}

fn stats() -> ApiTable {
    serde_json::from_str(STATS_JSON).unwrap()
}

fn range() -> DateRange {
    DateRange::parse("2020:001", "2020:010").unwrap()
}

#[test]
fn test_sessions_shaped_by_column_name() {
    let sessions = scheduled_sessions(&station()).unwrap();
    // the row without a program is dropped
    assert_eq!(sessions.len(), 5);
    assert_eq!(sessions[0].session_id, "r41001");
    assert_eq!(sessions[0].program, "IVS-R4");
    assert_eq!(sessions[0].time_start.to_string(), "2020-01-02 18:30:00");
}

#[test]
fn test_missing_column_is_an_error() {
    let resp: StationResponse =
        serde_json::from_str(r#"{"sessions": {"columns": ["session_id"], "rows": []}}"#).unwrap();
    assert!(matches!(
        scheduled_sessions(&resp),
        Err(AppError::MissingColumn(c)) if c == "program"
    ));
}

#[test]
fn test_statistics_inner_join() {
    let sessions = scheduled_sessions(&station()).unwrap();
    let joined = join_statistics(&sessions, &stats()).unwrap();

    let ids: Vec<&str> = joined.iter().map(|s| s.session_id.as_str()).collect();
    assert_eq!(ids, vec!["r41001", "r11002", "aua003"]);
    assert_eq!(joined[2].scans, Some(150.0));
    assert_eq!(joined[0].observations, Some(4000.0));
}

#[test]
fn test_range_filter_and_grouping() {
    let sessions = scheduled_sessions(&station()).unwrap();
    let in_range = filter_range(&sessions, &range());
    // old001 is before the range, aua003 sits exactly on the stop date
    assert_eq!(in_range.len(), 4);

    let counts = group_by_program(&in_range, StatKind::Sessions);
    assert_eq!(counts.get("IVS-R4"), Some(&2.0));
    assert_eq!(counts.get("IVS-R1"), Some(&1.0));
    assert_eq!(counts.get("AUSTRAL"), Some(&1.0));

    let joined = join_statistics(&in_range, &stats()).unwrap();
    let scans = group_by_program(&joined, StatKind::Scans);
    assert_eq!(scans.values().sum::<f64>(), 700.0);
}

#[test]
fn test_titles_and_file_names() {
    assert_eq!(station_code_for_api("nn"), "Nn");
    assert_eq!(
        chart_title(StatKind::Sessions, "Nn", &range()),
        "Session Distribution for Nn (001.2020 to 010.2020)"
    );
    assert_eq!(output_file_name(StatKind::Sessions, "Nn"), "nn_session_piechart.png");
    assert_eq!(output_file_name(StatKind::Observations, "Nn"), "nn_yearly_observations.png");
}

#[test]
fn test_run_schedule_offline() {
    let (st, sts) = write_api_fixtures("run_schedule_offline");
    let api = FileApi::new(Some(PathBuf::from(st)), Some(PathBuf::from(sts)));

    let charts = run_schedule(&api, "hb", &range(), &StatKind::ALL).unwrap();
    assert_eq!(charts.len(), 3);

    let sessions = &charts[0];
    assert_eq!(sessions.file_name, "hb_session_piechart.png");
    assert_eq!(sessions.pie.labels, vec!["AUSTRAL", "IVS-R1", "IVS-R4"]);
    assert_eq!(
        sessions.pie.legend_entries(),
        vec!["AUSTRAL: 25.00%", "IVS-R1: 25.00%", "IVS-R4: 50.00%"]
    );

    let sum: f64 = charts[2].pie.percentages().iter().sum();
    assert!((sum - 100.0).abs() < 1e-9);
}

#[test]
fn test_sessions_only_needs_no_statistics() {
    let (st, _) = write_api_fixtures("sessions_only");
    let api = FileApi::new(Some(PathBuf::from(st)), None);

    let charts = run_schedule(&api, "Hb", &range(), &[StatKind::Sessions]).unwrap();
    assert_eq!(charts.len(), 1);

    // without the stats file, scans cannot be charted
    assert!(run_schedule(&api, "Hb", &range(), &[StatKind::Scans]).is_err());
}

#[test]
fn test_empty_range_skips_charts() {
    let (st, sts) = write_api_fixtures("empty_range");
    let api = FileApi::new(Some(PathBuf::from(st)), Some(PathBuf::from(sts)));
    let empty = DateRange::parse("2010:001", "2010:100").unwrap();

    let charts = run_schedule(&api, "Hb", &empty, &StatKind::ALL).unwrap();
    assert!(charts.is_empty());
}
