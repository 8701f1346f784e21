// tests/daily_api.rs
mod common;

use chrono::NaiveDate;
use common::FixtureFetcher;
use crime_scrape::config::options::DateRange;
use crime_scrape::scrape::Collector;
use crime_scrape::specs::umich::{self, API_URL, UmichCollector};

fn day(ids: &[u32]) -> String {
    let rows: Vec<String> = ids
        .iter()
        .map(|id| {
            format!(
                r#"{{"id": {id}, "date": "2026-02-02 10:00:00.0", "address": "Mosher-Jordan Hall",
                    "description": "Larceny", "disposition": "Open OPEN", "narrative": "case {id}"}}"#
            )
        })
        .collect();
    format!(r#"{{"data": [{}]}}"#, rows.join(","))
}

fn feb(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
}

fn collector() -> UmichCollector {
    UmichCollector { dates: DateRange::new(feb(1), feb(3)) }
}

#[test]
fn a_failed_day_does_not_stop_later_days() {
    // 02/01 is not served.
    let fetcher = FixtureFetcher::new()
        .get(&format!("{API_URL}?date=02/02/2026"), &day(&[88001, 88002]))
        .get(&format!("{API_URL}?date=02/03/2026"), &day(&[88002, 88003]));

    let batch = collector().collect(&fetcher).unwrap();

    let requests = fetcher.requests.borrow();
    assert_eq!(
        *requests,
        vec![
            format!("{API_URL}?date=02/01/2026"),
            format!("{API_URL}?date=02/02/2026"),
            format!("{API_URL}?date=02/03/2026"),
        ]
    );

    // 88002 shows up on two days and is kept once, from the first day seen.
    assert_eq!(batch.found(), 3);
    let out = umich::SCHEMA.normalize(&batch).unwrap();
    let ids: Vec<&str> = out.records.iter().map(|r| r.case_number.as_str()).collect();
    assert_eq!(ids, vec!["88001", "88002", "88003"]);
    assert_eq!(out.records[0].disposition.as_deref(), Some("Open"));
}

#[test]
fn no_served_day_is_an_empty_batch() {
    let fetcher = FixtureFetcher::new();
    let batch = collector().collect(&fetcher).unwrap();
    assert_eq!(batch.found(), 0);
    assert_eq!(fetcher.requests.borrow().len(), 3);
}
