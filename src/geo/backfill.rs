// src/geo/backfill.rs
//
// School code → city, from the federal school code list. Used to make bare
// building names geocodable ("Wells Hall" → "Wells Hall, East Lansing").

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::core::encoding::{TextEncoding, decode_first};
use crate::core::sanitize::title_case;
use crate::csv::{parse_rows, split_header};
use crate::error::Result;

const CODE_COLUMN: &str = "School Code";
const CITY_COLUMN: &str = "City";

#[derive(Debug, Default, Clone)]
pub struct CityBackfill {
    cities: HashMap<String, String>,
}

impl CityBackfill {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the school code table from decoded text.
    pub fn from_text(text: &str) -> Self {
        let (headers, rows) = split_header(parse_rows(text, ','));
        let col = |name: &str| headers.iter().position(|h| h == name);
        let (Some(code_idx), Some(city_idx)) = (col(CODE_COLUMN), col(CITY_COLUMN)) else {
            warn!("school code table has no '{CODE_COLUMN}'/'{CITY_COLUMN}' columns; city backfill disabled");
            return Self::empty();
        };

        let mut table = Self::empty();
        for r in &rows {
            let (Some(code), Some(city)) = (r.get(code_idx), r.get(city_idx)) else {
                continue;
            };
            let (code, city) = (code.trim(), city.trim());
            if !code.is_empty() && !city.is_empty() {
                table.insert(code, city);
            }
        }
        table
    }

    /// Load from disk (utf-8, then cp1252). A missing file is an empty table.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "school code table not found; city backfill disabled");
                return Ok(Self::empty());
            }
            Err(e) => return Err(e.into()),
        };
        let (text, enc) = decode_first(&bytes, &TextEncoding::CSV_FALLBACK)?;
        let table = Self::from_text(&text);
        debug!(path = %path.display(), encoding = enc.label(), schools = table.len(), "school code table loaded");
        Ok(table)
    }

    pub fn insert(&mut self, school_code: &str, city: &str) {
        self.cities.insert(school_code.to_string(), city.to_string());
    }

    pub fn city(&self, school_code: &str) -> Option<String> {
        self.cities.get(school_code.trim()).map(|c| title_case(c))
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// `"{location}, {City}"` when the location has no comma yet and the
    /// school has a known city; otherwise the location unchanged.
    pub fn apply(&self, location: &str, school_code: &str) -> String {
        let loc = location.trim();
        if loc.is_empty() || loc.contains(',') {
            return loc.to_string();
        }
        match self.city(school_code) {
            Some(city) => format!("{loc}, {city}"),
            None => loc.to_string(),
        }
    }
}
