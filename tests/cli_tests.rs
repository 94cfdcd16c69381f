mod common;
use common::{
    sample_records, seed_db, setup_test_db, temp_dir, temp_out, vsum, write_api_fixtures,
};
use predicates::str::contains;
use std::fs;

fn seeded(name: &str) -> String {
    let db = setup_test_db(name);
    seed_db(&db, "Hb", &sample_records());
    db
}

#[test]
fn test_report_pdf_and_html() {
    let db = seeded("cli_report_both");
    let out = temp_out("cli_report_both", "pdf");
    let html = temp_out("cli_report_both", "html");

    vsum()
        .args([
            "--db", &db, "report", "hb", "2024:001", "2024:031", "--out", &out, "--format",
            "both", "--force",
        ])
        .assert()
        .success()
        .stdout(contains("Hb station report (2024-01-01 - 2024-01-31)"))
        .stdout(contains("Median station W.RMS over period: 25.0 ps"));

    let pdf = fs::read(&out).expect("read pdf");
    assert!(pdf.starts_with(b"%PDF"));
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("Reported issues"));
    assert!(text.contains("R4103: Hb: lost 2 hours, clock break"));
    assert!(text.contains("/Helvetica-Bold"));

    let page = fs::read_to_string(&html).expect("read html");
    assert!(page.contains("<table class=\"table table-bordered table-striped\">"));
    assert!(page.contains("data:image/png;base64,"));
    assert!(page.contains("Total number of Hb observations across all sessions in this time range: 4000"));
}

#[test]
fn test_report_pdf_with_table_and_charts() {
    let db = seeded("cli_report_charts");
    let out = temp_out("cli_report_charts", "pdf");
    let charts = temp_dir("cli_report_charts");
    let data = temp_out("cli_report_charts_data", "csv");

    vsum()
        .args([
            "--db",
            &db,
            "report",
            "Hb",
            "2024-01-01",
            "2024-01-31",
            "--out",
            &out,
            "--table",
            "--save-charts",
            &charts.to_string_lossy(),
            "--data",
            &data,
            "--force",
        ])
        .assert()
        .success();

    let pdf = String::from_utf8_lossy(&fs::read(&out).unwrap()).to_string();
    assert!(pdf.contains("Hb sessions"));

    for file in ["wRMS.png", "performance.png", "U_pos.png", "X_detect_rate.png"] {
        let png = fs::read(charts.join(file)).expect("chart written");
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    let csv = fs::read_to_string(&data).unwrap();
    assert!(csv.starts_with("ExpID,Date,Date_MJD"));
    assert_eq!(csv.lines().count(), 5);
}

#[test]
fn test_report_search_pattern() {
    let db = seeded("cli_report_search");
    let out = temp_out("cli_report_search", "html");

    vsum()
        .args([
            "--db", &db, "report", "Hb", "2024:001", "2024:031", "--out", &out, "--format",
            "html", "--search", "r4%", "--force",
        ])
        .assert()
        .success()
        .stdout(contains("Total number of Hb sessions found in database for this time range: 1"));
}

#[test]
fn test_report_without_sessions_fails() {
    let db = seeded("cli_report_empty");
    let out = temp_out("cli_report_empty", "pdf");

    vsum()
        .args(["--db", &db, "report", "Hb", "2010:001", "2010:031", "--out", &out])
        .assert()
        .failure()
        .stderr(contains("No sessions found for station Hb"));
}

#[test]
fn test_report_rejects_bad_station_code() {
    let db = seeded("cli_report_bad_station");

    vsum()
        .args(["--db", &db, "report", "Hb;--", "2024:001", "2024:031"])
        .assert()
        .failure()
        .stderr(contains("Invalid station code"));
}

#[test]
fn test_report_rejects_bad_date() {
    let db = seeded("cli_report_bad_date");

    vsum()
        .args(["--db", &db, "report", "Hb", "2024/01/01", "2024:031"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_report_missing_database() {
    let db = setup_test_db("cli_report_missing_db");

    vsum()
        .args(["--db", &db, "report", "Hb", "2024:001", "2024:031"])
        .assert()
        .failure()
        .stderr(contains("database not found"));
    assert!(!std::path::Path::new(&db).exists());
}

#[test]
fn test_schedule_offline_writes_pngs() {
    let (st, sts) = write_api_fixtures("cli_schedule");
    let dir = temp_dir("cli_schedule");

    vsum()
        .args([
            "schedule",
            "hb",
            "2020:001",
            "2020:010",
            "--station-json",
            &st,
            "--stats-json",
            &sts,
            "--out-dir",
            &dir.to_string_lossy(),
        ])
        .assert()
        .success()
        .stdout(contains("IVS-R4: 50.00%"));

    for file in [
        "hb_session_piechart.png",
        "hb_yearly_scans.png",
        "hb_yearly_observations.png",
    ] {
        assert!(dir.join(file).exists(), "{file} missing");
    }
}

#[test]
fn test_schedule_single_kind() {
    let (st, _) = write_api_fixtures("cli_schedule_kind");
    let dir = temp_dir("cli_schedule_kind");

    vsum()
        .args([
            "schedule",
            "Hb",
            "2020-01-01",
            "2020-01-10",
            "--kind",
            "sessions",
            "--station-json",
            &st,
            "--out-dir",
            &dir.to_string_lossy(),
        ])
        .assert()
        .success();

    assert!(dir.join("hb_session_piechart.png").exists());
    assert!(!dir.join("hb_yearly_scans.png").exists());
}

#[test]
fn test_db_info_lists_stations() {
    let db = seeded("cli_db_info");

    vsum()
        .args(["--db", &db, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Stations: 1"))
        .stdout(contains("hb"));
}

#[test]
fn test_init_and_print_config() {
    let home = temp_dir("cli_init_home");
    let db = setup_test_db("cli_init");

    vsum()
        .env("HOME", &home)
        .args(["--db", &db, "init", "--force"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    let conf = home.join(".vlbisummary").join("vlbisummary.conf");
    let yaml = fs::read_to_string(&conf).expect("config written");
    assert!(yaml.contains("glovdh.ethz.ch/api/v1"));
    assert!(yaml.contains(&db));

    vsum()
        .env("HOME", &home)
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("wrap_width: 160"));

    vsum()
        .env("HOME", &home)
        .args(["init"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

/// Home directory whose config file holds only `yaml`.
fn home_with_config(name: &str, yaml: &str) -> std::path::PathBuf {
    let home = temp_dir(name);
    let dir = home.join(".vlbisummary");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("vlbisummary.conf"), yaml).unwrap();
    home
}

#[test]
fn test_partial_config_gets_defaults() {
    let home = home_with_config("cli_partial_config", "debug: false\n");

    vsum()
        .env("HOME", &home)
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("stations.sqlite"))
        .stdout(contains("default_station: Nn"))
        .stdout(contains("wrap_width: 160"));

    vsum()
        .env("HOME", &home)
        .args(["init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_schedule_station_from_config() {
    let home = home_with_config("cli_schedule_default", "default_station: Hb\n");
    let (st, _) = write_api_fixtures("cli_schedule_default");
    let dir = temp_dir("cli_schedule_default_out");

    vsum()
        .env("HOME", &home)
        .args([
            "schedule",
            "--kind",
            "sessions",
            "--station-json",
            &st,
            "--out-dir",
            &dir.to_string_lossy(),
        ])
        .assert()
        .success()
        .stdout(contains("Schedule statistics for Hb"));

    // default range 2015:001-2025:001 covers every fixture row with a program
    assert!(dir.join("hb_session_piechart.png").exists());
}

#[test]
fn test_relative_outputs_land_in_output_dir() {
    let out_dir = temp_dir("cli_output_dir");
    let home = home_with_config(
        "cli_output_dir_home",
        &format!("output_dir: {}\n", out_dir.to_string_lossy()),
    );
    let db = seeded("cli_output_dir");

    vsum()
        .env("HOME", &home)
        .args([
            "--db",
            &db,
            "report",
            "Hb",
            "2024:001",
            "2024:031",
            "--format",
            "html",
            "--out",
            "hb_january.html",
            "--data",
            "hb_january.json",
            "--force",
        ])
        .assert()
        .success();

    assert!(out_dir.join("hb_january.html").exists());
    let json = fs::read_to_string(out_dir.join("hb_january.json")).unwrap();
    assert!(json.contains("\"ExpID\": \"r4103\""));
}
