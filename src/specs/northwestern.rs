// src/specs/northwestern.rs
//! Northwestern University daily blotter (main page plus monthly pages).
//!
//! Every page is a two-column label | value table. `Case Number` opens a
//! record. A value row with an empty label that reads like a timestamp
//! (`February 01, 2026 at 11:45:00 PM`) is the end of the occurred window.

use tracing::warn;
use url::Url;

use crate::core::Fetcher;
use crate::core::datetime::DateGrammar;
use crate::error::Result;
use crate::merge::MergeSet;
use crate::normalize::{LocationField, SchemaMap};
use crate::record::{RawBatch, RawRecord};
use crate::scrape::Collector;
use crate::scrape::label_value::{LabelRules, LabelTarget, parse_tables};

pub const SCHOOL_CODE: &str = "001740";
pub const BASE_URL: &str = "https://www.northwestern.edu/up/facts-and-figures/campus-crime/daily-blotter/";
pub const PAGES: &[&str] = &["blotter_ch.html", "blotter_ch-feb2026.html", "blotter_ch-mar2026.html"];

fn is_end_time(value: &str) -> bool {
    value.contains("at ") && value.chars().next().is_some_and(char::is_alphabetic)
}

pub const RULES: LabelRules = LabelRules {
    sentinel: "Case Number",
    key_field: "Number",
    labels: &[
        ("Date & Time: Reported", LabelTarget::Set("Reported")),
        ("Date & Time: Occurred", LabelTarget::Set("Occurred")),
        ("Location:", LabelTarget::Set("Location")),
        ("Common Name:", LabelTarget::Qualify("Location")),
        ("Incident Type:", LabelTarget::Set("Description")),
        ("Criminal Offense:", LabelTarget::Append("Narrative", " ")),
        ("Disposition:", LabelTarget::Set("Disposition")),
    ],
    unlabeled: Some((is_end_time as fn(&str) -> bool, "End_Occurred")),
};

pub static SCHEMA: SchemaMap = SchemaMap {
    school_code: SCHOOL_CODE,
    region: "Illinois, USA",
    case_number: "Number",
    occurred: "Occurred",
    reported: Some("Reported"),
    location: LocationField::SingleOr("Location", "Unknown Location"),
    description: Some("Description"),
    disposition: Some("Disposition"),
    narrative: Some("Narrative"),
    end_occurred: Some("End_Occurred"),
    coordinates: None,
    required: &["Number", "Occurred", "Location"],
    grammars: &[DateGrammar::MonthName12hSeconds],
};

pub fn parse_page(html: &str) -> Result<Vec<RawRecord>> {
    parse_tables(html, &RULES)
}

pub struct NorthwesternCollector;

impl Collector for NorthwesternCollector {
    fn name(&self) -> &'static str {
        "northwestern"
    }

    fn school_code(&self) -> &'static str {
        SCHOOL_CODE
    }

    fn collect(&self, fetcher: &dyn Fetcher) -> Result<RawBatch> {
        let base = Url::parse(BASE_URL)?;
        let mut merged = MergeSet::new();

        for page in PAGES {
            let url = base.join(page)?;
            let records = match fetcher.get(url.as_str()).and_then(|html| parse_page(&html)) {
                Ok(r) => r,
                Err(e) => {
                    warn!(page, error = %e, "blotter page skipped");
                    continue;
                }
            };
            merged.extend_by(records, |r| r.get("Number").map(str::to_string));
        }
        Ok(RawBatch::from_records(SCHOOL_CODE, merged.into_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body><table>
<tr><td>Case Number</td><td>2026-00311</td></tr>
<tr><td>Date &amp; Time: Reported</td><td>February 02, 2026 at 09:10:00 AM</td></tr>
<tr><td>Date &amp; Time: Occurred</td><td>February 01, 2026 at 10:30:00 PM</td></tr>
<tr><td></td><td>February 01, 2026 at 11:45:00 PM</td></tr>
<tr><td>Location:</td><td>710 N Lake Shore Dr</td></tr>
<tr><td>Common Name:</td><td>Abbott Hall</td></tr>
<tr><td>Incident Type:</td><td>Theft</td></tr>
<tr><td>Criminal Offense:</td><td>Theft - All Other Larceny</td></tr>
<tr><td>Disposition:</td><td>"OPEN"</td></tr>
<tr><td>Case Number</td><td>2026-00312</td></tr>
<tr><td>Date &amp; Time: Occurred</td><td>February 03, 2026 at 01:00:00 AM</td></tr>
<tr><td>Location:</td><td>303 E Superior St</td></tr>
</table></body></html>"#;

    #[test]
    fn blotter_page_yields_records_with_extras() {
        let recs = parse_page(PAGE).unwrap();
        assert_eq!(recs.len(), 2);
        let a = &recs[0];
        assert_eq!(a.get("Location"), Some("710 N Lake Shore Dr (Abbott Hall)"));
        assert_eq!(a.get("End_Occurred"), Some("February 01, 2026 at 11:45:00 PM"));
        assert_eq!(a.get("Narrative"), Some("Theft - All Other Larceny"));
        assert_eq!(recs[1].get("Number"), Some("2026-00312"));
    }

    #[test]
    fn month_name_times_parse() {
        let batch = RawBatch::from_records(SCHOOL_CODE, parse_page(PAGE).unwrap());
        let out = SCHEMA.normalize(&batch).unwrap();
        assert_eq!(out.records.len(), 2);
        let a = &out.records[0];
        assert_eq!(a.occurred_datetime.to_rfc3339(), "2026-02-01T22:30:00+00:00");
        assert_eq!(a.disposition.as_deref(), Some("Open"));
        assert_eq!(
            a.narrative.as_deref(),
            Some("Theft - All Other Larceny End occurred: February 01, 2026 at 11:45:00 PM")
        );
    }

    #[test]
    fn end_time_detection() {
        assert!(is_end_time("February 01, 2026 at 11:45:00 PM"));
        assert!(!is_end_time("2026 at noon"));
        assert!(!is_end_time("Lot 5"));
    }
}
