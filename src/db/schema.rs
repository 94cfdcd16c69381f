//! Station table layout. One table per station, named after the station
//! code, holding one row per correlated session.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use rusqlite::Connection;
use std::sync::LazyLock;

static STATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{1,8}$").expect("static regex"));

/// Columns selected for a report, in row order.
pub const SESSION_COLUMNS: [&str; 17] = [
    "ExpID",
    "Date",
    "Date_MJD",
    "Performance",
    "Performance_UsedVsRecov",
    "session_fit",
    "W_RMS_del",
    "Detect_Rate_X",
    "Detect_Rate_S",
    "Total_Obs",
    "Notes",
    "Pos_X",
    "Pos_Y",
    "Pos_Z",
    "Pos_E",
    "Pos_N",
    "Pos_U",
];

/// Validate a station code and return it quoted as an SQL identifier.
pub fn station_table(station: &str) -> AppResult<String> {
    let code = station.trim();
    if !STATION_RE.is_match(code) {
        return Err(AppError::InvalidStation(station.to_string()));
    }
    Ok(format!("\"{}\"", code.to_lowercase()))
}

/// Create an empty station table if it does not exist yet.
pub fn create_station_table(conn: &Connection, station: &str) -> AppResult<()> {
    let table = station_table(station)?;
    let sql = format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            ExpID                   TEXT PRIMARY KEY,
            Date                    TEXT NOT NULL,
            Date_MJD                REAL NOT NULL,
            Performance             REAL,
            Performance_UsedVsRecov REAL,
            session_fit             REAL,
            W_RMS_del               REAL,
            Detect_Rate_X           REAL,
            Detect_Rate_S           REAL,
            Total_Obs               INTEGER,
            Notes                   TEXT,
            Pos_X                   REAL,
            Pos_Y                   REAL,
            Pos_Z                   REAL,
            Pos_E                   REAL,
            Pos_N                   REAL,
            Pos_U                   REAL
        );"
    );
    conn.execute_batch(&sql)?;
    Ok(())
}
