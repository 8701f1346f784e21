// src/store.rs
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::consts::OUTPUT_SEP;
use crate::csv;
use crate::error::Result;
use crate::record::CanonicalRecord;

/// `{out_dir}/{code}_{slug}_processed.csv`
pub fn output_path(out_dir: &Path, school_code: &str, slug: &str) -> PathBuf {
    out_dir.join(format!("{school_code}_{slug}_processed.csv"))
}

/// Header plus one row per record.
pub fn write_records_to<W: Write>(mut w: W, records: &[CanonicalRecord]) -> io::Result<()> {
    csv::write_row(&mut w, &CanonicalRecord::HEADERS, OUTPUT_SEP)?;
    for rec in records {
        csv::write_row(&mut w, &rec.to_row(), OUTPUT_SEP)?;
    }
    w.flush()
}

/// Write (or overwrite) one institution's output file.
pub fn write_records(path: &Path, records: &[CanonicalRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = fs::File::create(path)?;
    write_records_to(BufWriter::new(file), records)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn writes_header_and_quoted_rows() {
        let rec = CanonicalRecord {
            school_code: s!("002290"),
            case_number: s!("MSU26-0101"),
            report_datetime: Some(Utc.with_ymd_and_hms(2026, 2, 2, 8, 0, 0).unwrap()),
            occurred_datetime: Utc.with_ymd_and_hms(2026, 2, 1, 19, 44, 0).unwrap(),
            location: s!("Wells Hall, East Lansing"),
            latitude: None,
            longitude: None,
            description: Some(s!("Larceny")),
            disposition: Some(s!("Closed")),
            narrative: None,
        };
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(&dir.path().join("out"), "002290", "michstate");
        write_records(&path, &[rec]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("school_code,case_number,report_datetime,occurred_datetime,location,latitude,longitude,description,disposition,narrative")
        );
        assert_eq!(
            lines.next(),
            Some("002290,MSU26-0101,2026-02-02T08:00:00.000000Z,2026-02-01T19:44:00.000000Z,\"Wells Hall, East Lansing\",,,Larceny,Closed,")
        );
        assert!(path.ends_with("002290_michstate_processed.csv"));
    }
}
