use chrono::NaiveDate;
use vlbisummary::errors::AppError;
use vlbisummary::utils::date::{
    DateRange, date_to_mjd, doy_label, fractional_year, mjd_to_date, parse_date_arg,
    parse_timestamp,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_parse_date_forms() {
    assert_eq!(parse_date_arg("2024:032").unwrap(), ymd(2024, 2, 1));
    assert_eq!(parse_date_arg("2024-02-01").unwrap(), ymd(2024, 2, 1));
    assert_eq!(parse_date_arg("60341").unwrap(), ymd(2024, 2, 1));
    assert!(matches!(parse_date_arg("yesterday"), Err(AppError::InvalidDate(_))));
    assert!(parse_date_arg("2023:366").is_err());
    assert!(matches!(
        parse_date_arg("200000000000000"),
        Err(AppError::InvalidDate(_))
    ));
    assert!(matches!(
        parse_date_arg("99999999999999999999999"),
        Err(AppError::InvalidDate(_))
    ));
}

#[test]
fn test_mjd_round_trip_anchor() {
    assert_eq!(date_to_mjd(ymd(1858, 11, 17)), 0.0);
    assert_eq!(date_to_mjd(ymd(2000, 1, 1)), 51544.0);
    assert_eq!(mjd_to_date(51544.75), Some(ymd(2000, 1, 1)));
    assert_eq!(mjd_to_date(1e15), None);
    assert_eq!(mjd_to_date(f64::MAX), None);
}

#[test]
fn test_range_is_inclusive_at_both_ends() {
    let range = DateRange::parse("2020:001", "2020:010").unwrap();
    assert!(range.contains(ymd(2020, 1, 1).and_hms_opt(0, 0, 0).unwrap()));
    assert!(range.contains(ymd(2020, 1, 10).and_hms_opt(0, 0, 0).unwrap()));
    assert!(!range.contains(ymd(2020, 1, 10).and_hms_opt(0, 0, 1).unwrap()));
    assert!(!range.contains(ymd(2019, 12, 31).and_hms_opt(23, 59, 0).unwrap()));
}

#[test]
fn test_range_rejects_reversed_dates() {
    assert!(matches!(
        DateRange::parse("2020-02-01", "2020-01-01"),
        Err(AppError::InvalidRange(_))
    ));
}

#[test]
fn test_fractional_year_and_doy_label() {
    assert_eq!(fractional_year(ymd(2024, 1, 1)), "2024.000000");
    assert_eq!(fractional_year(ymd(2023, 7, 2)), "2023.498630");
    assert_eq!(doy_label(ymd(2015, 1, 1)), "001.2015");
}

#[test]
fn test_parse_timestamp_variants() {
    let expected = ymd(2020, 1, 2).and_hms_opt(18, 30, 0).unwrap();
    assert_eq!(parse_timestamp("2020-01-02T18:30:00"), Some(expected));
    assert_eq!(parse_timestamp("2020-01-02 18:30:00"), Some(expected));
    assert_eq!(parse_timestamp("2020-01-02T18:30:00+00:00"), Some(expected));
    assert_eq!(
        parse_timestamp("2020-01-02"),
        ymd(2020, 1, 2).and_hms_opt(0, 0, 0)
    );
    assert_eq!(parse_timestamp("not a date"), None);
}
