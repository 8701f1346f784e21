// src/record.rs
//
// The two shapes a record takes on its way through the pipeline: the raw,
// source-shaped map every collector emits, and the canonical ten-field row.

use chrono::{DateTime, Utc};

use crate::config::consts::TIMESTAMP_FORMAT;

/// Source-shaped field name → text, in the order fields were first seen.
/// Setting a field that already exists keeps the first value, which is how
/// duplicate export headers resolve.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Insert unless `key` is already present. Returns whether it was inserted.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.fields.iter().any(|(k, _)| *k == key) {
            return false;
        }
        self.fields.push((key, value.into()));
        true
    }

    /// Overwrite (or insert) `key`.
    pub fn replace(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Append `suffix` to an existing non-empty value, or set it when absent.
    pub fn append(&mut self, key: &str, sep: &str, suffix: &str) {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some(slot) if !slot.1.trim().is_empty() => {
                slot.1.push_str(sep);
                slot.1.push_str(suffix);
            }
            Some(slot) => slot.1 = suffix.to_string(),
            None => self.fields.push((key.to_string(), suffix.to_string())),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut rec = RawRecord::new();
        for (k, v) in iter {
            rec.set(k, v);
        }
        rec
    }
}

/// Everything one collector produced for one institution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawBatch {
    pub school_code: String,
    /// Column set observed in the payload: file header, mapped table headers,
    /// or the union of populated keys. Empty means "not known".
    pub columns: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl RawBatch {
    pub fn new(school_code: &str) -> Self {
        Self { school_code: school_code.to_string(), ..Default::default() }
    }

    /// Build a batch whose column set is the union of keys seen in `records`.
    pub fn from_records(school_code: &str, records: Vec<RawRecord>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for rec in &records {
            for k in rec.keys() {
                if !columns.iter().any(|c| c == k) {
                    columns.push(k.to_string());
                }
            }
        }
        Self { school_code: school_code.to_string(), columns, records }
    }

    pub fn found(&self) -> usize {
        self.records.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalRecord {
    pub school_code: String,
    pub case_number: String,
    pub report_datetime: Option<DateTime<Utc>>,
    pub occurred_datetime: DateTime<Utc>,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: Option<String>,
    pub disposition: Option<String>,
    pub narrative: Option<String>,
}

impl CanonicalRecord {
    pub const HEADERS: [&'static str; 10] = [
        "school_code",
        "case_number",
        "report_datetime",
        "occurred_datetime",
        "location",
        "latitude",
        "longitude",
        "description",
        "disposition",
        "narrative",
    ];

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    pub fn set_coordinates(&mut self, coords: Option<(f64, f64)>) {
        self.latitude = coords.map(|c| c.0);
        self.longitude = coords.map(|c| c.1);
    }

    /// Output row in `HEADERS` order; absent values are empty cells.
    pub fn to_row(&self) -> Vec<String> {
        let ts = |dt: &DateTime<Utc>| dt.format(TIMESTAMP_FORMAT).to_string();
        let num = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
        vec![
            self.school_code.clone(),
            self.case_number.clone(),
            self.report_datetime.as_ref().map(ts).unwrap_or_default(),
            ts(&self.occurred_datetime),
            self.location.clone(),
            num(self.latitude),
            num(self.longitude),
            self.description.clone().unwrap_or_default(),
            self.disposition.clone().unwrap_or_default(),
            self.narrative.clone().unwrap_or_default(),
        ]
    }
}
