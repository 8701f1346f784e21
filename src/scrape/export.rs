// src/scrape/export.rs
//
// Tabular exports saved by the browser automation that drives JS-rendered
// dashboards. Files live at `{exports_dir}/{code}_{slug}.csv` (or `.tsv`);
// the delimiter is sniffed and the text encoding is whatever decodes first.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Collector;
use super::archives::{HeaderRule, map_headers};
use crate::core::Fetcher;
use crate::core::encoding::{TextEncoding, decode_first};
use crate::csv::{parse_rows, sniff_sep, split_header};
use crate::error::{IngestError, Result};
use crate::record::{RawBatch, RawRecord};

const EXTENSIONS: [&str; 2] = ["csv", "tsv"];

/// First existing `{code}_{slug}.{csv,tsv}` under `dir`.
pub fn locate(dir: &Path, school_code: &str, slug: &str) -> Result<PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{school_code}_{slug}.{ext}")))
        .find(|p| p.is_file())
        .ok_or_else(|| {
            IngestError::MissingExport(dir.join(format!("{school_code}_{slug}.csv")).display().to_string())
        })
}

/// Parse already-decoded export text. Without `rules` the trimmed file
/// headers are the raw field names; with `rules` headers are mapped and
/// unmatched columns dropped. Duplicate headers keep the first column.
pub fn parse_export(text: &str, school_code: &str, rules: Option<&[HeaderRule]>) -> RawBatch {
    let (headers, rows) = split_header(parse_rows(text, sniff_sep(text)));

    let names: Vec<Option<String>> = match rules {
        Some(rules) => map_headers(&headers, rules)
            .into_iter()
            .map(|f| f.map(str::to_string))
            .collect(),
        None => headers.iter().map(|h| Some(h.clone())).collect(),
    };

    let mut columns: Vec<String> = Vec::new();
    for name in names.iter().flatten() {
        if !columns.contains(name) {
            columns.push(name.clone());
        }
    }

    let records = rows
        .into_iter()
        .map(|row| {
            let mut rec = RawRecord::new();
            for (name, cell) in names.iter().zip(row) {
                if let Some(name) = name {
                    rec.set(name.as_str(), cell);
                }
            }
            rec
        })
        .collect();

    RawBatch { school_code: school_code.to_string(), columns, records }
}

/// Read, decode and parse an export file.
pub fn read_export(path: &Path, school_code: &str, rules: Option<&[HeaderRule]>) -> Result<RawBatch> {
    let bytes = fs::read(path)?;
    let (text, enc) = decode_first(&bytes, &TextEncoding::EXPORT_FALLBACK)?;
    debug!(path = %path.display(), encoding = enc.label(), "export decoded");
    Ok(parse_export(&text, school_code, rules))
}

/// Collector for a dashboard source: reads its export file instead of the network.
pub struct ExportCollector {
    pub name: &'static str,
    pub school_code: &'static str,
    pub dir: PathBuf,
    pub rules: Option<&'static [HeaderRule]>,
}

impl Collector for ExportCollector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn school_code(&self) -> &'static str {
        self.school_code
    }

    fn collect(&self, _fetcher: &dyn Fetcher) -> Result<RawBatch> {
        let path = locate(&self.dir, self.school_code, self.name)?;
        read_export(&path, self.school_code, self.rules)
    }
}
