// src/scrape/label_value.rs
//
// Two-column "label | value" tables where one record spans many rows. A
// sentinel label opens a record; the record closes when the next sentinel
// appears or the table ends.

use scraper::Html;

use crate::core::html::{selector, table_rows};
use crate::error::Result;
use crate::record::RawRecord;

/// What a known label does with its value.
#[derive(Clone, Copy, Debug)]
pub enum LabelTarget {
    Set(&'static str),
    /// Join onto an existing value with `sep`; set when empty.
    Append(&'static str, &'static str),
    /// Add as `" (value)"` after an existing value; set when empty.
    Qualify(&'static str),
}

#[derive(Clone, Copy, Debug)]
pub struct LabelRules {
    pub sentinel: &'static str,
    /// Field the sentinel's value is stored under.
    pub key_field: &'static str,
    pub labels: &'static [(&'static str, LabelTarget)],
    /// Rows with an empty label whose value passes the predicate go to the field.
    pub unlabeled: Option<(fn(&str) -> bool, &'static str)>,
}

impl LabelRules {
    fn target(&self, label: &str) -> Option<LabelTarget> {
        self.labels.iter().find(|(l, _)| *l == label).map(|(_, t)| *t)
    }
}

fn apply(rec: &mut RawRecord, target: LabelTarget, value: &str) {
    match target {
        LabelTarget::Set(field) => rec.replace(field, value),
        LabelTarget::Append(field, sep) => rec.append(field, sep, value),
        LabelTarget::Qualify(field) => match rec.get(field) {
            Some(cur) if !cur.trim().is_empty() => {
                let joined = format!("{cur} ({value})");
                rec.replace(field, joined);
            }
            _ => rec.replace(field, value),
        },
    }
}

/// Fold `(label, value)` rows into records. Rows before the first sentinel
/// and unknown labels are ignored; a sentinel with an empty value does not
/// open a record.
pub fn fold_pairs<I>(rows: I, rules: &LabelRules) -> Vec<RawRecord>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut out = Vec::new();
    let mut current: Option<RawRecord> = None;

    for (label, value) in rows {
        if label == rules.sentinel {
            if value.is_empty() {
                continue;
            }
            out.extend(current.take());
            let mut rec = RawRecord::new();
            rec.set(rules.key_field, value);
            current = Some(rec);
            continue;
        }

        let Some(rec) = current.as_mut() else { continue };
        if value.is_empty() {
            continue;
        }

        if label.is_empty() {
            if let Some((accepts, field)) = rules.unlabeled {
                if accepts(&value) {
                    rec.replace(field, value);
                }
            }
            continue;
        }

        if let Some(target) = rules.target(&label) {
            apply(rec, target, &value);
        }
    }

    out.extend(current);
    out
}

/// Parse every table in `html` as label/value rows. Each table is folded on
/// its own so a record never spans two tables.
pub fn parse_tables(html: &str, rules: &LabelRules) -> Result<Vec<RawRecord>> {
    let doc = Html::parse_document(html);
    let table_sel = selector("table")?;

    let mut out = Vec::new();
    for table in doc.select(&table_sel) {
        let pairs = table_rows(table)?
            .into_iter()
            .filter(|r| r.len() >= 2)
            .map(|mut r| {
                let value = std::mem::take(&mut r[1].text);
                let label = std::mem::take(&mut r[0].text);
                (label, value)
            });
        out.extend(fold_pairs(pairs, rules));
    }
    Ok(out)
}
