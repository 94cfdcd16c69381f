use crate::db::schema::{SESSION_COLUMNS, station_table};
use crate::errors::AppResult;
use crate::models::SessionRecord;
use crate::utils::date::{DateRange, mjd_to_date, parse_timestamp};
use chrono::NaiveTime;
use rusqlite::{Connection, Row, params};
use tracing::debug;

/// Parameters of the single query a report run issues.
#[derive(Debug, Clone)]
pub struct StationQuery {
    pub station: String,
    pub range: DateRange,
    /// SQL LIKE pattern applied to `ExpID`.
    pub search: String,
    /// Use `NOT LIKE` instead of `LIKE`.
    pub reverse: bool,
}

impl StationQuery {
    pub fn new(station: &str, range: DateRange) -> Self {
        Self {
            station: station.to_string(),
            range,
            search: "%".to_string(),
            reverse: false,
        }
    }

    pub fn sql(&self) -> AppResult<String> {
        let table = station_table(&self.station)?;
        let like = if self.reverse { "NOT LIKE" } else { "LIKE" };
        Ok(format!(
            "SELECT {cols} FROM {table} \
             WHERE ExpID {like} ?1 AND Date_MJD >= ?2 AND Date_MJD <= ?3 \
             ORDER BY Date ASC",
            cols = SESSION_COLUMNS.join(", "),
        ))
    }
}

/// Load the sessions of one station within the query range.
pub fn fetch_station_sessions(conn: &Connection, query: &StationQuery) -> AppResult<Vec<SessionRecord>> {
    let sql = query.sql()?;
    let (mjd_start, mjd_stop) = query.range.mjd_bounds();

    debug!(%sql, search = %query.search, mjd_start, mjd_stop, "station query");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![query.search, mjd_start, mjd_stop], map_row)?;

    let mut sessions = Vec::new();
    for r in rows {
        sessions.push(r?);
    }

    debug!(rows = sessions.len(), columns = SESSION_COLUMNS.len(), "station query result");
    Ok(sessions)
}

/// Mapping DB -> SessionRecord.
///
/// `Date` is stored as text; when it cannot be parsed the day is
/// recovered from `Date_MJD`.
fn map_row(row: &Row<'_>) -> rusqlite::Result<SessionRecord> {
    let date_raw: Option<String> = row.get(1)?;
    let date_mjd: f64 = row.get(2)?;

    let date = date_raw
        .as_deref()
        .and_then(parse_timestamp)
        .or_else(|| mjd_to_date(date_mjd).map(|d| d.and_time(NaiveTime::MIN)))
        .ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                1,
                rusqlite::types::Type::Text,
                format!("unparsable session date: {:?}", date_raw).into(),
            )
        })?;

    Ok(SessionRecord {
        exp_id: row.get(0)?,
        date,
        date_mjd,
        performance: row.get(3)?,
        performance_used_vs_recov: row.get(4)?,
        session_fit: row.get(5)?,
        w_rms_del: row.get(6)?,
        detect_rate_x: row.get(7)?,
        detect_rate_s: row.get(8)?,
        total_obs: row.get(9)?,
        notes: row.get(10)?,
        pos_x: row.get(11)?,
        pos_y: row.get(12)?,
        pos_z: row.get(13)?,
        pos_e: row.get(14)?,
        pos_n: row.get(15)?,
        pos_u: row.get(16)?,
    })
}

/// Insert one session row. Used to seed station tables.
pub fn insert_session(conn: &Connection, station: &str, s: &SessionRecord) -> AppResult<()> {
    let table = station_table(station)?;
    let placeholders: Vec<String> = (1..=SESSION_COLUMNS.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT OR REPLACE INTO {table} ({}) VALUES ({})",
        SESSION_COLUMNS.join(", "),
        placeholders.join(", ")
    );

    conn.execute(
        &sql,
        params![
            s.exp_id,
            s.date.format("%Y-%m-%d %H:%M:%S").to_string(),
            s.date_mjd,
            s.performance,
            s.performance_used_vs_recov,
            s.session_fit,
            s.w_rms_del,
            s.detect_rate_x,
            s.detect_rate_s,
            s.total_obs,
            s.notes,
            s.pos_x,
            s.pos_y,
            s.pos_z,
            s.pos_e,
            s.pos_n,
            s.pos_u,
        ],
    )?;
    Ok(())
}
