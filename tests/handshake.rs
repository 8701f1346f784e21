// tests/handshake.rs
mod common;

use common::FixtureFetcher;
use crime_scrape::IngestError;
use crime_scrape::scrape::Collector;
use crime_scrape::specs::nebraska::{ARCHIVE_URL, NebraskaCollector};

const FORM: &str = "<form method='post'><input type='hidden' name='_UserID' value='XYZ123'></form>";

const ARCHIVE: &str = "<table>\
    <tr><td>Case #</td><td>Incident Code</td><td>Reported</td><td>Start Occurred</td><td>Location</td><td>Disposition</td></tr>\
    <tr><td>26-000900</td><td>DUI</td><td>02/05/2026 01:30</td><td>02/05/2026 01:10</td><td>16TH &amp; R ST</td><td>ARREST</td></tr>\
    </table>";

#[test]
fn token_is_posted_back() {
    let fetcher = FixtureFetcher::new()
        .post(ARCHIVE_URL, FORM)
        .post(&format!("{ARCHIVE_URL}?_UserID=XYZ123"), ARCHIVE);

    let batch = NebraskaCollector.collect(&fetcher).unwrap();
    assert_eq!(batch.found(), 1);
    assert_eq!(batch.records[0].get("Location"), Some("16TH & R ST"));
    assert_eq!(
        *fetcher.requests.borrow(),
        vec![format!("POST {ARCHIVE_URL}"), format!("POST {ARCHIVE_URL}?_UserID=XYZ123")]
    );
}

#[test]
fn missing_token_fails_the_source() {
    let fetcher = FixtureFetcher::new().post(ARCHIVE_URL, "<html>maintenance</html>");
    let err = NebraskaCollector.collect(&fetcher).unwrap_err();
    assert!(matches!(err, IngestError::Handshake { .. }));
    assert!(err.is_structural());
    assert_eq!(fetcher.requests.borrow().len(), 1);
}
