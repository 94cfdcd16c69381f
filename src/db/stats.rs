use crate::db::pool::DbPool;
use crate::db::schema::station_table;
use crate::errors::AppResult;
use crate::ui::messages::{detail, header};
use rusqlite::Connection;
use std::fs;

/// Per-station overview row for `db --info`.
#[derive(Debug, Clone)]
pub struct StationOverview {
    pub station: String,
    pub sessions: i64,
    pub first: Option<String>,
    pub last: Option<String>,
}

/// Names of the tables that look like station tables (have `ExpID` and
/// `Date_MJD` columns).
pub fn list_stations(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
         ORDER BY name",
    )?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stations = Vec::new();
    for name in names {
        if station_table(&name).is_err() {
            continue;
        }
        let mut cols = conn.prepare(&format!("PRAGMA table_info(\"{name}\")"))?;
        let columns = cols
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<_>, _>>()?;
        if columns.iter().any(|c| c == "ExpID") && columns.iter().any(|c| c == "Date_MJD") {
            stations.push(name);
        }
    }
    Ok(stations)
}

pub fn station_overview(conn: &Connection, station: &str) -> AppResult<StationOverview> {
    let table = station_table(station)?;
    let (sessions, first, last) = conn.query_row(
        &format!("SELECT COUNT(*), MIN(Date), MAX(Date) FROM {table}"),
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;
    Ok(StationOverview {
        station: station.to_string(),
        sessions,
        first,
        last,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    header("Station database");
    detail("File", db_path);
    detail("Size", format!("{:.2} MB", file_mb));

    let stations = list_stations(&pool.conn)?;
    detail("Stations", stations.len());

    for name in &stations {
        let o = station_overview(&pool.conn, name)?;
        println!(
            "    {:<8} {:>6} sessions   {} .. {}",
            o.station,
            o.sessions,
            o.first.as_deref().unwrap_or("--"),
            o.last.as_deref().unwrap_or("--"),
        );
    }

    println!();
    Ok(())
}
