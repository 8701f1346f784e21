// src/normalize.rs
//
// Raw batch → canonical records, driven by one `SchemaMap` per institution.
// Structural drift fails the whole batch; a bad row only drops that row.

use tracing::{debug, warn};

use crate::config::consts::COORD_DECIMALS;
use crate::core::datetime::{DateGrammar, parse_any};
use crate::core::sanitize::{clean_disposition, clean_narrative, clean_text, present};
use crate::error::{IngestError, Result};
use crate::geo::round_to;
use crate::record::{CanonicalRecord, RawBatch, RawRecord};

/// Where a source keeps its location text. A row without one is kept with
/// an empty location unless the source names a placeholder.
#[derive(Clone, Copy, Debug)]
pub enum LocationField {
    Single(&'static str),
    /// Column, then the placeholder used when it is empty or a null sentinel.
    SingleOr(&'static str, &'static str),
    /// First column with a usable value wins (e.g. street address, then building).
    FirstNonEmpty(&'static [&'static str]),
}

impl LocationField {
    fn read(&self, rec: &RawRecord) -> Option<String> {
        match self {
            LocationField::Single(col) => rec.get(col).and_then(clean_text),
            LocationField::SingleOr(col, placeholder) => {
                Some(rec.get(col).and_then(clean_text).unwrap_or_else(|| placeholder.to_string()))
            }
            LocationField::FirstNonEmpty(cols) => {
                cols.iter().find_map(|col| rec.get(col).and_then(clean_text))
            }
        }
    }
}

/// Per-institution mapping from raw field names onto the canonical schema.
#[derive(Clone, Copy, Debug)]
pub struct SchemaMap {
    pub school_code: &'static str,
    /// Appended to addresses before geocoding, e.g. `"Illinois, USA"`.
    pub region: &'static str,
    pub case_number: &'static str,
    pub occurred: &'static str,
    pub reported: Option<&'static str>,
    pub location: LocationField,
    pub description: Option<&'static str>,
    pub disposition: Option<&'static str>,
    pub narrative: Option<&'static str>,
    pub end_occurred: Option<&'static str>,
    /// Latitude and longitude columns, for sources that publish them.
    pub coordinates: Option<(&'static str, &'static str)>,
    /// Raw fields that must exist in the batch's column set.
    pub required: &'static [&'static str],
    pub grammars: &'static [DateGrammar],
}

/// Why a row didn't make it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropReason {
    MissingCaseNumber,
    UnparsableOccurred,
}

#[derive(Debug, Default)]
pub struct Normalized {
    pub records: Vec<CanonicalRecord>,
    pub dropped: usize,
}

impl SchemaMap {
    /// Fail loudly if a required column is absent from the payload.
    pub fn check_columns(&self, batch: &RawBatch) -> Result<()> {
        if batch.columns.is_empty() {
            return Ok(());
        }
        match self.required.iter().find(|col| !batch.has_column(col)) {
            Some(col) => Err(IngestError::SchemaDrift {
                school_code: self.school_code.to_string(),
                column: col.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn normalize_record(&self, rec: &RawRecord) -> std::result::Result<CanonicalRecord, DropReason> {
        let case_number = rec
            .get(self.case_number)
            .and_then(present)
            .ok_or(DropReason::MissingCaseNumber)?;

        let occurred_datetime = rec
            .get(self.occurred)
            .and_then(|raw| parse_any(self.grammars, raw))
            .ok_or(DropReason::UnparsableOccurred)?;

        let location = self.location.read(rec).unwrap_or_default();

        let report_datetime = self
            .reported
            .and_then(|col| rec.get(col))
            .and_then(|raw| parse_any(self.grammars, raw));

        let field = |col: Option<&str>| col.and_then(|c| rec.get(c));

        let mut narrative = field(self.narrative).and_then(clean_narrative);
        if let Some(end) = field(self.end_occurred).and_then(present) {
            narrative = Some(match narrative {
                Some(n) => format!("{n} End occurred: {end}"),
                None => format!("End occurred: {end}"),
            });
        }

        let coords = self.coordinates.and_then(|(lat, lon)| {
            let lat = rec.get(lat)?.trim().parse::<f64>().ok()?;
            let lon = rec.get(lon)?.trim().parse::<f64>().ok()?;
            (lat.is_finite() && lon.is_finite())
                .then(|| (round_to(lat, COORD_DECIMALS), round_to(lon, COORD_DECIMALS)))
        });

        let mut out = CanonicalRecord {
            school_code: self.school_code.to_string(),
            case_number,
            report_datetime,
            occurred_datetime,
            location,
            latitude: None,
            longitude: None,
            description: field(self.description).and_then(clean_text),
            disposition: field(self.disposition).and_then(clean_disposition),
            narrative,
        };
        out.set_coordinates(coords);
        Ok(out)
    }

    /// Zero or one canonical record per raw record, plus the drop count.
    pub fn normalize(&self, batch: &RawBatch) -> Result<Normalized> {
        self.check_columns(batch)?;

        let mut out = Normalized::default();
        for rec in &batch.records {
            match self.normalize_record(rec) {
                Ok(r) => out.records.push(r),
                Err(reason) => {
                    debug!(school = self.school_code, ?reason, case = rec.get(self.case_number), "row dropped");
                    out.dropped += 1;
                }
            }
        }
        if out.dropped > 0 {
            warn!(
                school = self.school_code,
                dropped = out.dropped,
                kept = out.records.len(),
                "rows failed validation"
            );
        }
        Ok(out)
    }
}
