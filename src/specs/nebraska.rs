// src/specs/nebraska.rs
//! University of Nebraska-Lincoln 60-day archive.
//!
//! Session handshake: an empty POST returns a form with a hidden `_UserID`;
//! POSTing it back returns the log table. The header row sits below a few
//! title rows and is recognized by its `Case #` and `Incident Code` cells.

use crate::core::Fetcher;
use crate::core::datetime::DateGrammar;
use crate::error::Result;
use crate::normalize::{LocationField, SchemaMap};
use crate::record::RawBatch;
use crate::scrape::Collector;
use crate::scrape::archives::{HeaderRow, HeaderRule, extract_tables};
use crate::scrape::handshake::{TokenForm, fetch_with_token};

pub const SCHOOL_CODE: &str = "002565";
pub const ARCHIVE_URL: &str = "https://scsapps.unl.edu/policereports/ArchiveFile.aspx";

pub const TOKEN: TokenForm = TokenForm { pattern: r"name='_UserID' value='([^']+)'", field: "_UserID" };

const HEADER_ROW: HeaderRow = HeaderRow::Containing(&["Case #", "Incident Code"]);

const RULES: &[HeaderRule] = &[
    HeaderRule::new(&["case", "#"], "Number"),
    HeaderRule::new(&["incident code"], "Description"),
    HeaderRule::new(&["reported"], "Reported"),
    HeaderRule::new(&["disposition"], "Disposition"),
    HeaderRule::new(&["start occurred"], "Occurred"),
    HeaderRule::new(&["end occurred"], "End_Occurred"),
    HeaderRule::new(&["location"], "Location"),
];

pub static SCHEMA: SchemaMap = SchemaMap {
    school_code: SCHOOL_CODE,
    region: "Nebraska, USA",
    case_number: "Number",
    occurred: "Occurred",
    reported: Some("Reported"),
    location: LocationField::Single("Location"),
    description: Some("Description"),
    disposition: Some("Disposition"),
    narrative: None,
    end_occurred: Some("End_Occurred"),
    coordinates: None,
    required: &["Number", "Occurred", "Location"],
    grammars: &[DateGrammar::NumericDate24h, DateGrammar::NumericDate12h],
};

pub fn parse_archive(html: &str) -> Result<RawBatch> {
    let rows = extract_tables(html, HEADER_ROW, RULES)?;
    Ok(RawBatch { school_code: SCHOOL_CODE.to_string(), columns: rows.columns, records: rows.records })
}

pub struct NebraskaCollector;

impl Collector for NebraskaCollector {
    fn name(&self) -> &'static str {
        "nebraska"
    }

    fn school_code(&self) -> &'static str {
        SCHOOL_CODE
    }

    fn collect(&self, fetcher: &dyn Fetcher) -> Result<RawBatch> {
        let html = fetch_with_token(fetcher, ARCHIVE_URL, TOKEN)?;
        parse_archive(&html)
    }
}
