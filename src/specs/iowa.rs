// src/specs/iowa.rs
//! University of Iowa. Dashboard export whose column titles drift between
//! releases, so headers are matched by keyword instead of exact name.

use std::path::Path;

use crate::core::datetime::DateGrammar;
use crate::normalize::{LocationField, SchemaMap};
use crate::scrape::archives::HeaderRule;
use crate::scrape::export::ExportCollector;

pub const SCHOOL_CODE: &str = "001892";

pub const RULES: &[HeaderRule] = &[
    HeaderRule::new(&["latitude"], "latitude"),
    HeaderRule::new(&["longitude"], "longitude"),
    HeaderRule::new(&["report"], "Reported"),
    HeaderRule::new(&["occur"], "Occurred"),
    HeaderRule::new(&["case"], "Number"),
    HeaderRule::new(&["incident", "#"], "Number"),
    HeaderRule::new(&["number"], "Number"),
    HeaderRule::new(&["location"], "Location"),
    HeaderRule::new(&["address"], "Location"),
    HeaderRule::new(&["disposition"], "Disposition"),
    HeaderRule::new(&["status"], "Disposition"),
    HeaderRule::new(&["offense"], "Description"),
    HeaderRule::new(&["incident"], "Description"),
    HeaderRule::new(&["description"], "Description"),
    HeaderRule::new(&["narrative"], "Narrative"),
    HeaderRule::new(&["summary"], "Narrative"),
];

pub static SCHEMA: SchemaMap = SchemaMap {
    school_code: SCHOOL_CODE,
    region: "Iowa, USA",
    case_number: "Number",
    occurred: "Occurred",
    reported: Some("Reported"),
    location: LocationField::Single("Location"),
    description: Some("Description"),
    disposition: Some("Disposition"),
    narrative: Some("Narrative"),
    end_occurred: None,
    coordinates: Some(("latitude", "longitude")),
    required: &["Number", "Occurred", "Location"],
    grammars: DateGrammar::FLEXIBLE,
};

pub fn collector(exports_dir: &Path) -> ExportCollector {
    ExportCollector { name: "iowa", school_code: SCHOOL_CODE, dir: exports_dir.to_path_buf(), rules: Some(RULES) }
}
