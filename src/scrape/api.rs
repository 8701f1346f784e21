// src/scrape/api.rs
//
// JSON endpoints that wrap their rows in `{"data": [...]}`. Rows are either
// positional arrays or keyed objects.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{IngestError, Result};
use crate::record::RawRecord;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Vec<Value>>,
}

/// The `data` array of a response body.
pub fn data_rows(body: &str, url: &str) -> Result<Vec<Value>> {
    let env: Envelope = serde_json::from_str(body)?;
    env.data.ok_or_else(|| IngestError::Payload {
        url: url.to_string(),
        reason: s!("no `data` array"),
    })
}

/// Scalar JSON value as text; `null`, arrays and objects are empty.
pub fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => s!(),
    }
}

/// Array rows mapped by column position. Short rows leave trailing fields
/// unset; non-array rows are skipped.
pub fn positional(rows: &[Value], columns: &[&str]) -> Vec<RawRecord> {
    rows.iter()
        .filter_map(Value::as_array)
        .map(|cells| {
            columns
                .iter()
                .zip(cells.iter())
                .map(|(name, v)| (*name, value_text(v)))
                .collect::<RawRecord>()
        })
        .collect()
}

/// Object rows mapped by key: `(json_key, raw_field)`.
pub fn keyed(rows: &[Value], keys: &[(&str, &str)]) -> Vec<RawRecord> {
    rows.iter()
        .filter_map(Value::as_object)
        .map(|obj| {
            keys.iter()
                .filter_map(|(k, field)| obj.get(*k).map(|v| (*field, value_text(v))))
                .collect::<RawRecord>()
        })
        .collect()
}
