//! Date arguments, date ranges and the time scales used by the station
//! database (MJD) and the position series (fractional year).

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static YDAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}):(\d{1,3})$").expect("static regex"));
static MJD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5,}(\.\d+)?$").expect("static regex"));

/// MJD day zero.
pub fn mjd_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1858, 11, 17).unwrap_or_default()
}

/// Parse a date given on the command line.
///
/// Accepted forms:
/// - `YYYY:DDD`   day of year (`2024:032`)
/// - `YYYY-MM-DD` ISO date
/// - `NNNNN[.f]`  Modified Julian Date
pub fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    let s = s.trim();

    if let Some(caps) = YDAY_RE.captures(s) {
        let year: i32 = caps[1]
            .parse()
            .map_err(|_| AppError::InvalidDate(s.to_string()))?;
        let doy: u32 = caps[2]
            .parse()
            .map_err(|_| AppError::InvalidDate(s.to_string()))?;
        return NaiveDate::from_yo_opt(year, doy).ok_or_else(|| AppError::InvalidDate(s.to_string()));
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }

    if MJD_RE.is_match(s) {
        let mjd: f64 = s.parse().map_err(|_| AppError::InvalidDate(s.to_string()))?;
        return mjd_to_date(mjd).ok_or_else(|| AppError::InvalidDate(s.to_string()));
    }

    Err(AppError::InvalidDate(format!(
        "{s} (expected YYYY:DDD, YYYY-MM-DD or MJD)"
    )))
}

/// Parse a timestamp coming from the database or the scheduling API.
///
/// Zone offsets are dropped and the wall-clock time is kept.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

pub fn date_to_mjd(date: NaiveDate) -> f64 {
    (date - mjd_epoch()).num_days() as f64
}

pub fn datetime_to_mjd(ts: NaiveDateTime) -> f64 {
    let epoch = mjd_epoch().and_time(NaiveTime::MIN);
    (ts - epoch).num_milliseconds() as f64 / 86_400_000.0
}

pub fn mjd_to_date(mjd: f64) -> Option<NaiveDate> {
    if !mjd.is_finite() {
        return None;
    }
    // Out-of-range day counts yield None instead of overflowing.
    let days = Duration::try_days(mjd.floor() as i64)?;
    mjd_epoch().checked_add_signed(days)
}

/// Year plus elapsed fraction of that year, e.g. `2024.084699`.
pub fn fractional_year(date: NaiveDate) -> String {
    let year = date.year();
    let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(date);
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap_or(date);

    let elapsed = (date - start).num_seconds() as f64;
    let length = (end - start).num_seconds() as f64;
    let fraction = if length > 0.0 { elapsed / length } else { 0.0 };

    format!("{:.6}", year as f64 + fraction)
}

/// `DDD.YYYY`, as printed in the schedule chart titles.
pub fn doy_label(date: NaiveDate) -> String {
    date.format("%j.%Y").to_string()
}

/// Closed date interval used by both pipelines.
///
/// Endpoints are dates at midnight; a timestamp equal to either endpoint
/// is inside the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub stop: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, stop: NaiveDate) -> AppResult<Self> {
        if stop < start {
            return Err(AppError::InvalidRange(format!(
                "stop date {stop} is before start date {start}"
            )));
        }
        Ok(Self { start, stop })
    }

    /// Build a range from two command-line date arguments.
    pub fn parse(start: &str, stop: &str) -> AppResult<Self> {
        Self::new(parse_date_arg(start)?, parse_date_arg(stop)?)
    }

    pub fn start_ts(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    pub fn stop_ts(&self) -> NaiveDateTime {
        self.stop.and_time(NaiveTime::MIN)
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.start_ts() && ts <= self.stop_ts()
    }

    pub fn mjd_bounds(&self) -> (f64, f64) {
        (date_to_mjd(self.start), date_to_mjd(self.stop))
    }

    pub fn start_iso(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn stop_iso(&self) -> String {
        self.stop.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start_iso(), self.stop_iso())
    }
}
