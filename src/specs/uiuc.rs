// src/specs/uiuc.rs
//! University of Illinois Urbana-Champaign. Dashboard export, comma-separated.

use std::path::Path;

use crate::core::datetime::DateGrammar;
use crate::normalize::{LocationField, SchemaMap};
use crate::scrape::export::ExportCollector;

pub const SCHOOL_CODE: &str = "001775";

pub static SCHEMA: SchemaMap = SchemaMap {
    school_code: SCHOOL_CODE,
    region: "Illinois, USA",
    case_number: "Number",
    occurred: "Occurred From Date/Time",
    reported: Some("Reported Date/Time"),
    location: LocationField::Single("Location"),
    description: Some("Description"),
    disposition: Some("Disposition"),
    narrative: None,
    end_occurred: None,
    coordinates: Some(("latitude", "longitude")),
    required: &["Number", "Reported Date/Time", "Occurred From Date/Time", "Location"],
    grammars: &[DateGrammar::NumericDate24h],
};

pub fn collector(exports_dir: &Path) -> ExportCollector {
    ExportCollector { name: "uiuc", school_code: SCHOOL_CODE, dir: exports_dir.to_path_buf(), rules: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::export::parse_export;

    #[test]
    fn export_rows_normalize() {
        let text = "Number,Reported Date/Time,Occurred From Date/Time,Location,Description,Disposition\n\
                    C26-0101,02/02/2026 08:00,02/01/2026 19:44,Illini Union,THEFT,\"CLOSED, ARREST\"\n\
                    C26-0102,02/02/2026 09:00,13/40/2026 99:99,Lot E14,Trespass,Open\n";
        let out = SCHEMA.normalize(&parse_export(text, SCHOOL_CODE, None)).unwrap();
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.dropped, 1);
        assert_eq!(out.records[0].disposition.as_deref(), Some("Closed - Arrest"));
        assert_eq!(out.records[0].description.as_deref(), Some("THEFT"));
    }

    #[test]
    fn renamed_column_is_schema_drift() {
        let text = "Case,Reported Date/Time,Occurred From Date/Time,Location\nC1,,02/01/2026 19:44,Lot\n";
        let err = SCHEMA.normalize(&parse_export(text, SCHOOL_CODE, None)).unwrap_err();
        assert!(err.is_structural());
    }
}
