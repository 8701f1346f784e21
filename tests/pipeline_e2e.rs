// tests/pipeline_e2e.rs
mod common;

use std::fs;

use common::{CountingGeocoder, FixtureFetcher};
use crime_scrape::config::options::{RunOptions, SourceSelector};
use crime_scrape::geo::{CityBackfill, GeocodeCache, LocationResolver};
use crime_scrape::pipeline::Pipeline;
use crime_scrape::progress::Progress;
use crime_scrape::specs::{self, nebraska};

const FORM: &str = "<input type='hidden' name='_UserID' value='T0K'>";
const ARCHIVE: &str = "<table>\
    <tr><td>Case #</td><td>Incident Code</td><td>Reported</td><td>Start Occurred</td><td>Location</td><td>Disposition</td></tr>\
    <tr><td>26-1</td><td>DUI</td><td>02/05/2026 01:30</td><td>02/05/2026 01:10</td><td>16th and R St</td><td>ARREST</td></tr>\
    <tr><td>26-1</td><td>DUI</td><td>02/05/2026 01:30</td><td>02/05/2026 01:10</td><td>16th and R St</td><td>ARREST</td></tr>\
    <tr><td>26-2</td><td>THEFT</td><td>02/05/2026 09:00</td><td>13/40/2026 99:99</td><td>Love Library</td><td>OPEN</td></tr>\
    </table>";

const UIUC_EXPORT: &str = "Number,Reported Date/Time,Occurred From Date/Time,Location,Description,Disposition\n\
    C26-01,02/02/2026 08:00,02/01/2026 19:44,Illini Union,Theft,Open\n";

const SCHOOL_CODES: &str = "School Code,School Name,City\n001775,UNIVERSITY OF ILLINOIS,URBANA\n";

#[derive(Default)]
struct Recorder {
    total: usize,
    done: Vec<String>,
    failed: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn item_done(&mut self, school_code: &str, _kept: usize) {
        self.done.push(school_code.to_string());
    }
    fn item_failed(&mut self, school_code: &str, _error: &str) {
        self.failed.push(school_code.to_string());
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}

#[test]
fn sources_run_independently_and_cache_is_persisted() {
    let tmp = tempfile::tempdir().unwrap();
    let exports = tmp.path().join("exports");
    let out_dir = tmp.path().join("out");
    let cache_path = tmp.path().join("geocode_cache.json");
    fs::create_dir_all(&exports).unwrap();
    fs::write(exports.join("001775_uiuc.csv"), UIUC_EXPORT).unwrap();
    fs::write(&cache_path, r#"{"Illini Union, Urbana, Illinois, USA": [40.1092, -88.2272]}"#).unwrap();

    let opts = RunOptions {
        sources: SourceSelector::Only(vec!["nebraska".into(), "purdue".into(), "uiuc".into()]),
        exports_dir: exports,
        out_dir: out_dir.clone(),
        ..RunOptions::default()
    };
    let institutions = specs::selected(&opts);
    assert_eq!(institutions.len(), 3);

    // Purdue's index is not served, so that source fails with a 404.
    let fetcher = FixtureFetcher::new()
        .post(nebraska::ARCHIVE_URL, FORM)
        .post(&format!("{}?_UserID=T0K", nebraska::ARCHIVE_URL), ARCHIVE);

    let (geo, calls) = CountingGeocoder::new(Some((40.8206, -96.7056)));
    let resolver = LocationResolver::new(GeocodeCache::load(&cache_path), Some(Box::new(geo)));
    let backfill = CityBackfill::from_text(SCHOOL_CODES);

    let mut pipeline = Pipeline::new(&fetcher, backfill, resolver, out_dir.clone());
    let mut progress = Recorder::default();
    let reports = pipeline.run(&institutions, &mut progress);
    let stats = pipeline.finish().unwrap();

    assert_eq!(progress.total, 3);
    assert!(progress.finished);
    assert_eq!(progress.done, vec!["002565", "001775"]);
    assert_eq!(progress.failed, vec!["001825"]);

    let neb = &reports[0];
    assert_eq!((neb.found, neb.kept, neb.dropped, neb.duplicates), (3, 1, 1, 1));
    let purdue = &reports[1];
    assert!(purdue.error.as_deref().unwrap_or("").contains("404"));
    assert!(!purdue.structural);

    // UIUC location came from the cache after backfill; Nebraska needed one lookup.
    assert_eq!(calls.get(), 1);
    assert_eq!(stats.cache_hits, 1);

    let uiuc_csv = fs::read_to_string(out_dir.join("001775_uiuc_processed.csv")).unwrap();
    assert!(uiuc_csv.contains("\"Illini Union, Urbana\",40.1092,-88.2272,Theft,Open,"));
    assert!(!out_dir.join("001825_purdue_processed.csv").exists());

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&cache_path).unwrap()).unwrap();
    assert_eq!(saved["16th and R St, Nebraska, USA"], serde_json::json!([40.8206, -96.7056]));
    assert_eq!(saved.as_object().unwrap().len(), 2);
}

#[test]
fn missing_export_is_reported_not_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let opts = RunOptions {
        sources: SourceSelector::Only(vec!["osu".into()]),
        exports_dir: tmp.path().to_path_buf(),
        out_dir: tmp.path().join("out"),
        ..RunOptions::default()
    };
    let fetcher = FixtureFetcher::new();
    let resolver = LocationResolver::new(GeocodeCache::in_memory(), None);
    let mut pipeline = Pipeline::new(&fetcher, CityBackfill::empty(), resolver, opts.out_dir.clone());

    let reports = pipeline.run(&specs::selected(&opts), &mut crime_scrape::progress::NullProgress);
    assert_eq!(reports.len(), 1);
    assert!(reports[0].error.as_deref().unwrap().contains("export file not found"));
    assert!(fetcher.requests.borrow().is_empty());
}
