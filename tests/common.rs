#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use std::env;
use std::fs;
use std::path::PathBuf;
use vlbisummary::db::pool::DbPool;
use vlbisummary::db::queries::insert_session;
use vlbisummary::db::schema::create_station_table;
use vlbisummary::models::SessionRecord;
use vlbisummary::utils::date::datetime_to_mjd;

/// Binary under test, isolated from the user's configuration file.
pub fn vsum() -> Command {
    let mut cmd = cargo_bin_cmd!("vlbisummary");
    cmd.env("HOME", temp_home());
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd
}

pub fn temp_home() -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push("vlbisummary_test_home");
    fs::create_dir_all(&path).ok();
    path
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_vlbisummary.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh empty directory inside tempdir
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_vlbisummary_dir", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

pub fn at_noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid date")
}

pub fn at_midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid date")
}

/// A session with every metric populated.
pub fn record(exp_id: &str, date: NaiveDateTime, wrms: f64, notes: &str) -> SessionRecord {
    SessionRecord {
        exp_id: exp_id.to_string(),
        date,
        date_mjd: datetime_to_mjd(date),
        performance: Some(0.9),
        performance_used_vs_recov: Some(0.95),
        session_fit: Some(wrms + 5.0),
        w_rms_del: Some(wrms),
        detect_rate_x: Some(0.8),
        detect_rate_s: Some(0.7),
        total_obs: Some(1000.0),
        notes: Some(notes.to_string()),
        pos_x: Some(-3_950_236.7),
        pos_y: Some(2_522_347.5),
        pos_z: Some(-4_311_562.5),
        pos_e: Some(1.0),
        pos_n: Some(-2.0),
        pos_u: Some(10.0),
    }
}

/// Four Hobart sessions in January 2024, one with sentinel metrics.
pub fn sample_records() -> Vec<SessionRecord> {
    let mut sentinel = record("r1104", at_noon(2024, 1, 15), -999.0, "");
    sentinel.session_fit = Some(-999.0);
    sentinel.performance = Some(0.0);
    sentinel.detect_rate_x = None;
    sentinel.pos_u = Some(0.0);

    vec![
        record("r1102", at_noon(2024, 1, 2), 20.0, "Applied manual phase calibration"),
        record("r4103", at_noon(2024, 1, 8), 30.0, "Hb: lost 2 hours, clock break"),
        sentinel,
        record("aua101", at_noon(2024, 1, 22), 25.0, "ok"),
    ]
}

pub fn seed_db(db_path: &str, station: &str, records: &[SessionRecord]) {
    let pool = DbPool::new(db_path).expect("open db");
    create_station_table(&pool.conn, station).expect("create table");
    for r in records {
        insert_session(&pool.conn, station, r).expect("insert session");
    }
}

pub const STATION_JSON: &str = r#"{
  "sessions": {
    "columns": ["session_id", "program", "time_start", "stations"],
    "rows": [
      ["r41001", "IVS-R4", "2020-01-02T18:30:00", "HbKeYg"],
      ["r11002", "IVS-R1", "2020-01-06T17:00:00", "HbKe"],
      ["aua003", "AUSTRAL", "2020-01-10T00:00:00", "HbKeYg"],
      ["r41004", "IVS-R4", "2020-01-09T18:30:00", "HbYg"],
      ["old001", "IVS-R1", "2019-12-31T23:59:00", "Hb"],
      ["noprg", null, "2020-01-03T00:00:00", "Hb"]
    ]
  }
}"#;

pub const STATS_JSON: &str = r#"{
  "columns": ["session_id", "scans", "observations"],
  "rows": [
    ["r41001", 300, 4000],
    ["r11002", 250, 3000],
    ["aua003", "150", 1000],
    ["unknown", 999, 999]
  ]
}"#;

/// Write the offline API fixtures, returning (station, stats) paths.
pub fn write_api_fixtures(name: &str) -> (String, String) {
    let station = temp_out(&format!("{name}_station"), "json");
    let stats = temp_out(&format!("{name}_stats"), "json");
    fs::write(&station, STATION_JSON).expect("write station json");
    fs::write(&stats, STATS_JSON).expect("write stats json");
    (station, stats)
}
