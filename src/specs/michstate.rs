// src/specs/michstate.rs
//! Michigan State University Clery log.
//!
//! `GET /clery.php` returns `{"data": [[...9 values...], ...]}` with columns
//! identified by position only.

use crate::core::Fetcher;
use crate::core::datetime::DateGrammar;
use crate::error::Result;
use crate::normalize::{LocationField, SchemaMap};
use crate::record::RawBatch;
use crate::scrape::Collector;
use crate::scrape::api::{data_rows, positional};

pub const SCHOOL_CODE: &str = "002290";
pub const API_URL: &str = "https://go.msu.edu/clery.php";

pub const COLUMNS: [&str; 9] = [
    "Description",
    "Code",
    "Building",
    "Address",
    "UnknownField",
    "Occurred_Time",
    "Reported_Time",
    "Case_Number",
    "Status",
];

pub static SCHEMA: SchemaMap = SchemaMap {
    school_code: SCHOOL_CODE,
    region: "Michigan, USA",
    case_number: "Case_Number",
    occurred: "Occurred_Time",
    reported: Some("Reported_Time"),
    location: LocationField::FirstNonEmpty(&["Address", "Building"]),
    description: Some("Description"),
    disposition: Some("Status"),
    narrative: None,
    end_occurred: None,
    coordinates: None,
    required: &["Case_Number", "Occurred_Time"],
    grammars: DateGrammar::FLEXIBLE,
};

pub fn parse(body: &str) -> Result<RawBatch> {
    let rows = data_rows(body, API_URL)?;
    let records = positional(&rows, &COLUMNS);
    Ok(RawBatch::from_records(SCHOOL_CODE, records))
}

pub struct MichStateCollector;

impl Collector for MichStateCollector {
    fn name(&self) -> &'static str {
        "msu"
    }

    fn school_code(&self) -> &'static str {
        SCHOOL_CODE
    }

    fn collect(&self, fetcher: &dyn Fetcher) -> Result<RawBatch> {
        parse(&fetcher.get(API_URL)?)
    }
}
