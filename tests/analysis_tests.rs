mod common;
use common::{at_noon, record, sample_records};
use vlbisummary::core::analysis::{
    detect_rate_analysis, performance_analysis, position_analysis, wrms_analysis,
};
use vlbisummary::core::problems::{extract_problems, is_problem};
use vlbisummary::core::summary::{StationSummary, SummaryOptions};
use vlbisummary::errors::AppError;
use vlbisummary::models::{Band, Coord};
use vlbisummary::utils::date::DateRange;

fn january() -> DateRange {
    DateRange::parse("2024-01-01", "2024-01-31").unwrap()
}

fn keywords() -> Vec<String> {
    SummaryOptions::default().problem_keywords
}

#[test]
fn test_wrms_excludes_sentinel_rows() {
    let a = wrms_analysis(&sample_records());
    assert_eq!(a.samples, 3);
    assert_eq!(a.median, Some(25.0));
    assert_eq!(a.text.as_deref(), Some("Median station W.RMS over period: 25.0 ps"));
    assert_eq!(a.chart.width(), 640);
}

#[test]
fn test_session_wrms_sentinel_dropped_on_its_own() {
    let mut lone = record("r1105", at_noon(2024, 1, 29), 40.0, "");
    lone.session_fit = Some(-999.0);
    let mut records = sample_records();
    records.push(lone);

    // station W.RMS keeps the row: 20, 25, 30, 40
    let a = wrms_analysis(&records);
    assert_eq!(a.samples, 4);
    assert_eq!(a.median, Some(27.5));

    // the session overlay drops it: 25, 35, 30
    assert_eq!(a.overlay_median, Some(30.0));
}

#[test]
fn test_zero_sentinels_are_no_data() {
    let records = sample_records();

    let perf = performance_analysis(&records);
    assert_eq!(perf.samples, 3);
    assert_eq!(
        perf.text.as_deref(),
        Some("Median station 'Performance' (used/scheduled) over period: 0.9")
    );

    assert_eq!(detect_rate_analysis(&records, Band::X).samples, 3);
    assert_eq!(detect_rate_analysis(&records, Band::S).samples, 4);

    let up = position_analysis(&records, Coord::U);
    assert_eq!(up.samples, 3);
    assert_eq!(up.median, Some(10.0));
    assert!(up.text.is_none());
}

#[test]
fn test_missing_band_reports_no_data() {
    let mut records = sample_records();
    for r in &mut records {
        r.detect_rate_s = None;
    }
    let a = detect_rate_analysis(&records, Band::S);
    assert_eq!(a.median, None);
    assert_eq!(a.text.as_deref(), Some("No S-band data present..."));
}

#[test]
fn test_problem_keywords_selected() {
    let kw = keywords();
    assert!(is_problem("Lost fringes on three baselines", &kw));
    assert!(is_problem("PCAL off", &kw));
    assert!(is_problem("started late due to maintenance", &kw));
    assert!(!is_problem("latency nominal", &kw));
    assert!(!is_problem("nominal session", &kw));
}

#[test]
fn test_manual_phase_note_is_not_a_problem() {
    let problems = extract_problems(&sample_records(), &keywords(), 160);
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0], vec!["R4103: Hb: lost 2 hours, clock break".to_string()]);
}

#[test]
fn test_long_problem_notes_are_wrapped() {
    let mut records = sample_records();
    records[3].notes = Some(format!("clock {}", "jump ".repeat(60)));
    let problems = extract_problems(&records, &keywords(), 160);
    let wrapped = problems.last().unwrap();
    assert!(wrapped.len() > 1);
    assert!(wrapped.iter().all(|l| l.chars().count() <= 160));
}

#[test]
fn test_summary_totals_and_bundle() {
    let records = sample_records();
    let s = StationSummary::build("Hb", january(), &records, &SummaryOptions::default()).unwrap();

    assert_eq!(s.total_sessions, 4);
    assert_eq!(s.total_observations, 4000);
    assert_eq!(s.title(), "Hb station report (2024-01-01 - 2024-01-31)");
    assert_eq!(s.summary_lines().len(), 4);
    assert_eq!(s.positions.len(), 6);

    assert!(!s.table.headers.contains(&"Notes".to_string()));
    assert!(s.table.headers.contains(&"W_RMS_del".to_string()));
    assert_eq!(s.table.rows.len(), 4);
    assert_eq!(s.table.headers[1], "Date");
    assert_eq!(s.table.rows[0][1], "2024-01-02 12:00:00");

    let b = s.to_bundle().unwrap();
    assert_eq!(
        b.text("total_sessions"),
        Some("Total number of Hb sessions found in database for this time range: 4")
    );
    assert_eq!(
        b.text("fractional_range"),
        Some("Fractional year range: 2024.000000 - 2024.081967")
    );
    for key in ["wrms_img", "performance_img", "U_pos_img", "problems", "table_data"] {
        assert!(b.get(key).is_some(), "missing section {key}");
    }
}

#[test]
fn test_empty_result_is_no_sessions() {
    let err = StationSummary::build("Hb", january(), &[], &SummaryOptions::default());
    assert!(matches!(err, Err(AppError::NoSessions { .. })));
}
