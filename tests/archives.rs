// tests/archives.rs
mod common;

use common::FixtureFetcher;
use crime_scrape::scrape::Collector;
use crime_scrape::specs::purdue::{self, ARCHIVES_BASE, INDEX_URL, PurdueCollector};

const INDEX: &str = r#"<html><body><ul>
  <li><a href="index.php">Archives home</a></li>
  <li><a href="2026-january-daily-crime-log.php">January 2026</a></li>
  <li><a href="2026-february-daily-crime-log.php">February 2026</a></li>
  <li><a href="2026-january-daily-crime-log.php">January 2026 (again)</a></li>
  <li><a href="2026-march-daily-crime-log.php">March 2026</a></li>
  <li><a href="/ehps/police/contact.php">Contact</a></li>
</ul></body></html>"#;

const HEADER: &str = "<tr><th>Nature</th><th>Case Number</th><th>Date/Time Occurred</th>\
    <th>Date/Time Reported</th><th>General Location</th><th>Disposition</th></tr>";

fn archive(rows: &[(&str, &str)]) -> String {
    let mut html = format!("<html><body><table>{HEADER}");
    for (case, location) in rows {
        html.push_str(&format!(
            "<tr><td>Theft</td><td>{case}</td><td>02/01/26 7:44 PM</td>\
             <td>02/02/26 8:00 AM</td><td>{location}</td><td>Inactive</td></tr>"
        ));
    }
    html.push_str("</table></body></html>");
    html
}

#[test]
fn index_links_are_deduped_and_a_bad_archive_is_skipped() {
    let jan = format!("{ARCHIVES_BASE}2026-january-daily-crime-log.php");
    let feb = format!("{ARCHIVES_BASE}2026-february-daily-crime-log.php");
    let march = format!("{ARCHIVES_BASE}2026-march-daily-crime-log.php");

    // March is listed but not served.
    let fetcher = FixtureFetcher::new()
        .get(INDEX_URL, INDEX)
        .get(&jan, &archive(&[("26PUR0001", "Hawkins Hall"), ("26PUR0002", "Wiley Hall")]))
        .get(&feb, &archive(&[("26PUR0040", "Lot 5")]));

    let batch = PurdueCollector.collect(&fetcher).unwrap();
    assert_eq!(batch.found(), 3);

    let requests = fetcher.requests.borrow();
    assert_eq!(*requests, vec![INDEX_URL.to_string(), jan, feb, march]);

    let out = purdue::SCHEMA.normalize(&batch).unwrap();
    let cases: Vec<&str> = out.records.iter().map(|r| r.case_number.as_str()).collect();
    assert_eq!(cases, vec!["26PUR0001", "26PUR0002", "26PUR0040"]);
    assert_eq!(out.records[2].location, "Lot 5");
}

#[test]
fn missing_index_fails_the_source() {
    let fetcher = FixtureFetcher::new();
    let err = PurdueCollector.collect(&fetcher).unwrap_err();
    assert!(err.to_string().contains("404"));
}
