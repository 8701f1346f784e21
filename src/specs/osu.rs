// src/specs/osu.rs
//! Ohio State University (Columbus). Tab-delimited dashboard export; the
//! file's encoding depends on which browser saved it, and `Disposition`
//! appears twice (the first column is the one we want).

use std::path::Path;

use crate::core::datetime::DateGrammar;
use crate::normalize::{LocationField, SchemaMap};
use crate::scrape::export::ExportCollector;

pub const SCHOOL_CODE: &str = "003090";

pub static SCHEMA: SchemaMap = SchemaMap {
    school_code: SCHOOL_CODE,
    region: "Ohio, USA",
    case_number: "Case Number",
    occurred: "Date/Time Occurrence Start",
    reported: Some("Date/Time Reported"),
    location: LocationField::Single("General Location"),
    description: Some("Offenses"),
    disposition: Some("Disposition"),
    narrative: None,
    end_occurred: None,
    coordinates: None,
    required: &["Case Number", "Date/Time Occurrence Start", "General Location"],
    grammars: &[DateGrammar::NumericDate12hSeconds, DateGrammar::NumericDate12h, DateGrammar::NumericDate24h],
};

pub fn collector(exports_dir: &Path) -> ExportCollector {
    ExportCollector { name: "osu", school_code: SCHOOL_CODE, dir: exports_dir.to_path_buf(), rules: None }
}
