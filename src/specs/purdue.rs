// src/specs/purdue.rs
//! Purdue West Lafayette daily crime log archives.
//!
//! The index page links one `*-daily-crime-log.php` archive per period. Each
//! archive holds one table per day, first row `<th>` headers.

use tracing::{info, warn};

use crate::core::Fetcher;
use crate::core::datetime::DateGrammar;
use crate::error::Result;
use crate::normalize::{LocationField, SchemaMap};
use crate::record::RawBatch;
use crate::scrape::Collector;
use crate::scrape::archives::{HeaderRow, HeaderRule, TableRows, archive_links, extract_tables};

pub const SCHOOL_CODE: &str = "001825";
pub const INDEX_URL: &str =
    "https://www.purdue.edu/ehps/police/statistics-policies/daily-crime-log-archives/index.php";
pub const ARCHIVES_BASE: &str =
    "https://www.purdue.edu/ehps/police/statistics-policies/daily-crime-log-archives/";

const LINK_MARKER: &str = "daily-crime-log.php";
const LINK_EXCLUDE: &str = "index";

const RULES: &[HeaderRule] = &[
    HeaderRule::new(&["nature"], "Description"),
    HeaderRule::new(&["case number"], "Number"),
    HeaderRule::new(&["occurred"], "Occurred"),
    HeaderRule::new(&["reported"], "Reported"),
    HeaderRule::new(&["location"], "Location"),
    HeaderRule::new(&["disposition"], "Disposition"),
];

pub static SCHEMA: SchemaMap = SchemaMap {
    school_code: SCHOOL_CODE,
    region: "Indiana, USA",
    case_number: "Number",
    occurred: "Occurred",
    reported: Some("Reported"),
    location: LocationField::Single("Location"),
    description: Some("Description"),
    disposition: Some("Disposition"),
    narrative: None,
    end_occurred: None,
    coordinates: None,
    required: &["Number", "Occurred", "Location"],
    grammars: &[DateGrammar::ShortYear12h, DateGrammar::NumericDate12h],
};

pub fn parse_index(html: &str) -> Result<Vec<String>> {
    archive_links(html, ARCHIVES_BASE, LINK_MARKER, LINK_EXCLUDE)
}

pub fn parse_archive(html: &str) -> Result<TableRows> {
    extract_tables(html, HeaderRow::FirstWithTh, RULES)
}

pub struct PurdueCollector;

impl Collector for PurdueCollector {
    fn name(&self) -> &'static str {
        "purdue"
    }

    fn school_code(&self) -> &'static str {
        SCHOOL_CODE
    }

    fn collect(&self, fetcher: &dyn Fetcher) -> Result<RawBatch> {
        let links = parse_index(&fetcher.get(INDEX_URL)?)?;
        info!(archives = links.len(), "purdue archive pages found");

        let mut all = TableRows::default();
        for url in &links {
            // One bad archive page shouldn't cost the others.
            match fetcher.get(url).and_then(|html| parse_archive(&html)) {
                Ok(rows) => all.absorb(rows),
                Err(e) => warn!(url = url.as_str(), error = %e, "archive page skipped"),
            }
        }
        Ok(RawBatch { school_code: SCHOOL_CODE.to_string(), columns: all.columns, records: all.records })
    }
}
