mod common;
use common::{at_midnight, record, sample_records, seed_db, setup_test_db};
use rusqlite::Connection;
use vlbisummary::db::queries::{StationQuery, fetch_station_sessions};
use vlbisummary::db::schema::station_table;
use vlbisummary::db::stats::{list_stations, station_overview};
use vlbisummary::errors::AppError;
use vlbisummary::utils::date::DateRange;

fn query(range: (&str, &str)) -> StationQuery {
    StationQuery::new("Hb", DateRange::parse(range.0, range.1).unwrap())
}

fn ids(conn: &Connection, q: &StationQuery) -> Vec<String> {
    fetch_station_sessions(conn, q)
        .unwrap()
        .into_iter()
        .map(|r| r.exp_id)
        .collect()
}

#[test]
fn test_fetch_sorted_by_date() {
    let db = setup_test_db("db_sorted");
    let mut records = sample_records();
    records.reverse();
    seed_db(&db, "Hb", &records);

    let conn = Connection::open(&db).unwrap();
    assert_eq!(
        ids(&conn, &query(("2024-01-01", "2024-01-31"))),
        vec!["r1102", "r4103", "r1104", "aua101"]
    );
}

#[test]
fn test_fetch_range_inclusive_at_midnight() {
    let db = setup_test_db("db_inclusive");
    seed_db(
        &db,
        "Hb",
        &[
            record("first", at_midnight(2024, 1, 2), 20.0, ""),
            record("last", at_midnight(2024, 1, 8), 20.0, ""),
            record("after", at_midnight(2024, 1, 9), 20.0, ""),
        ],
    );

    let conn = Connection::open(&db).unwrap();
    assert_eq!(ids(&conn, &query(("2024-01-02", "2024-01-08"))), vec!["first", "last"]);
}

#[test]
fn test_search_and_reverse() {
    let db = setup_test_db("db_search");
    seed_db(&db, "Hb", &sample_records());
    let conn = Connection::open(&db).unwrap();

    let mut q = query(("2024-01-01", "2024-01-31"));
    q.search = "r1%".to_string();
    assert_eq!(ids(&conn, &q), vec!["r1102", "r1104"]);

    q.reverse = true;
    assert_eq!(ids(&conn, &q), vec!["r4103", "aua101"]);
}

#[test]
fn test_rows_keep_sentinels_and_nulls() {
    let db = setup_test_db("db_sentinels");
    seed_db(&db, "Hb", &sample_records());
    let conn = Connection::open(&db).unwrap();

    let rows = fetch_station_sessions(&conn, &query(("2024-01-01", "2024-01-31"))).unwrap();
    let sentinel = rows.iter().find(|r| r.exp_id == "r1104").unwrap();
    assert_eq!(sentinel.w_rms_del, Some(-999.0));
    assert_eq!(sentinel.detect_rate_x, None);
    assert_eq!(sentinel.total_obs, Some(1000.0));
    assert_eq!(sentinel.note(), None);
}

#[test]
fn test_station_code_validated() {
    assert_eq!(station_table("Hb").unwrap(), "\"hb\"");
    assert!(matches!(station_table("Hb; DROP TABLE hb"), Err(AppError::InvalidStation(_))));
    assert!(station_table("").is_err());
    assert!(station_table("WAYTOOLONG").is_err());
}

#[test]
fn test_list_stations_and_overview() {
    let db = setup_test_db("db_overview");
    seed_db(&db, "Hb", &sample_records());
    seed_db(&db, "Ke", &sample_records()[..1]);
    let conn = Connection::open(&db).unwrap();
    conn.execute_batch("CREATE TABLE unrelated (id INTEGER);").unwrap();

    assert_eq!(list_stations(&conn).unwrap(), vec!["hb", "ke"]);

    let o = station_overview(&conn, "Hb").unwrap();
    assert_eq!(o.sessions, 4);
    assert_eq!(o.first.as_deref(), Some("2024-01-02 12:00:00"));
}
