// src/specs/umich.rs
//! University of Michigan DPSS crime log API.
//!
//! One GET per calendar day (`?date=MM/DD/YYYY`); the response is
//! `{"data": [{id, date, address, description, disposition, narrative}]}`.
//! Incidents spanning days come back more than once, so days are merged by id.

use tracing::{debug, warn};

use crate::config::options::DateRange;
use crate::core::Fetcher;
use crate::core::datetime::DateGrammar;
use crate::error::Result;
use crate::merge::MergeSet;
use crate::normalize::{LocationField, SchemaMap};
use crate::record::{RawBatch, RawRecord};
use crate::scrape::Collector;
use crate::scrape::api::{data_rows, keyed};

pub const SCHOOL_CODE: &str = "002325";
pub const API_URL: &str = "https://www.dpss.umich.edu/api/GetCrimeLogCache";

const KEYS: &[(&str, &str)] = &[
    ("id", "Id"),
    ("date", "Occurred"),
    ("address", "Location"),
    ("description", "Description"),
    ("disposition", "Disposition"),
    ("narrative", "Narrative"),
];

pub static SCHEMA: SchemaMap = SchemaMap {
    school_code: SCHOOL_CODE,
    region: "Michigan, USA",
    case_number: "Id",
    occurred: "Occurred",
    reported: None,
    location: LocationField::Single("Location"),
    description: Some("Description"),
    disposition: Some("Disposition"),
    narrative: Some("Narrative"),
    end_occurred: None,
    coordinates: None,
    required: &["Id", "Occurred", "Location"],
    grammars: &[DateGrammar::IsoFractional],
};

/// Dispositions carry a four-character status code at the end; an empty
/// remainder means the log never recorded one.
pub fn trim_disposition(raw: &str) -> String {
    let n = raw.chars().count();
    let kept: String = raw.chars().take(n.saturating_sub(4)).collect();
    if kept.is_empty() { s!("Unknown") } else { kept }
}

pub fn parse_day(body: &str, url: &str) -> Result<Vec<RawRecord>> {
    let rows = data_rows(body, url)?;
    let mut records = keyed(&rows, KEYS);
    for rec in &mut records {
        let disp = trim_disposition(rec.get("Disposition").unwrap_or(""));
        rec.replace("Disposition", disp);
    }
    Ok(records)
}

pub struct UmichCollector {
    pub dates: DateRange,
}

impl Collector for UmichCollector {
    fn name(&self) -> &'static str {
        "umich"
    }

    fn school_code(&self) -> &'static str {
        SCHOOL_CODE
    }

    fn collect(&self, fetcher: &dyn Fetcher) -> Result<RawBatch> {
        let mut merged = MergeSet::new();

        for day in self.dates.days() {
            let date = day.format("%m/%d/%Y").to_string();
            let records = match fetcher
                .get_query(API_URL, &[("date", date.as_str())])
                .and_then(|body| parse_day(&body, API_URL))
            {
                Ok(r) => r,
                Err(e) => {
                    warn!(date = %date, error = %e, "day fetch failed; skipping");
                    continue;
                }
            };
            let added = merged.extend_by(records, |r| r.get("Id").map(str::to_string));
            debug!(date = %date, added, "day merged");
        }
        Ok(RawBatch::from_records(SCHOOL_CODE, merged.into_vec()))
    }
}
