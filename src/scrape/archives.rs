// src/scrape/archives.rs
//
// Table-shaped pages whose column headers vary. Headers are matched to raw
// field names with small keyword rule tables; an index page may link to many
// such archive pages.

use scraper::Html;
use url::Url;

use crate::core::html::{Cell, selector, table_rows};
use crate::error::Result;
use crate::merge::MergeSet;
use crate::record::RawRecord;

/// Header → raw field. A rule matches when every keyword occurs in the
/// lower-cased header text. For each header the first matching rule wins.
#[derive(Clone, Copy, Debug)]
pub struct HeaderRule {
    pub keywords: &'static [&'static str],
    pub field: &'static str,
}

impl HeaderRule {
    pub const fn new(keywords: &'static [&'static str], field: &'static str) -> Self {
        Self { keywords, field }
    }

    fn matches(&self, header_lc: &str) -> bool {
        self.keywords.iter().all(|k| header_lc.contains(k))
    }
}

/// Which row of a table carries the column headers.
#[derive(Clone, Copy, Debug)]
pub enum HeaderRow {
    /// The first row, when it has at least one `<th>`.
    FirstWithTh,
    /// The first row whose cell texts include every one of these labels.
    Containing(&'static [&'static str]),
}

impl HeaderRow {
    fn locate(&self, rows: &[Vec<Cell>]) -> Option<usize> {
        match self {
            HeaderRow::FirstWithTh => {
                rows.first().filter(|r| r.iter().any(|c| c.is_header)).map(|_| 0)
            }
            HeaderRow::Containing(labels) => rows.iter().position(|r| {
                labels.iter().all(|l| r.iter().any(|c| c.text == *l))
            }),
        }
    }
}

/// Map each header to a field (or nothing).
pub fn map_headers(headers: &[String], rules: &[HeaderRule]) -> Vec<Option<&'static str>> {
    headers
        .iter()
        .map(|h| {
            let lc = h.to_lowercase();
            rules.iter().find(|r| r.matches(&lc)).map(|r| r.field)
        })
        .collect()
}

/// Rows pulled out of one page: the fields that appeared in any mapped
/// header, and one record per data row.
#[derive(Debug, Default)]
pub struct TableRows {
    pub columns: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl TableRows {
    pub fn absorb(&mut self, other: TableRows) {
        for c in other.columns {
            if !self.columns.contains(&c) {
                self.columns.push(c);
            }
        }
        self.records.extend(other.records);
    }
}

/// Extract records from every table in `html` that has a recognizable header
/// row. Data rows with fewer than two `<td>` cells are skipped.
pub fn extract_tables(html: &str, header_row: HeaderRow, rules: &[HeaderRule]) -> Result<TableRows> {
    let doc = Html::parse_document(html);
    let table_sel = selector("table")?;
    let mut out = TableRows::default();

    for table in doc.select(&table_sel) {
        let rows = table_rows(table)?;
        let Some(at) = header_row.locate(&rows) else { continue };

        let headers: Vec<String> = rows[at].iter().map(|c| c.text.clone()).collect();
        let mapping = map_headers(&headers, rules);
        for field in mapping.iter().flatten() {
            if !out.columns.iter().any(|c| c == field) {
                out.columns.push(field.to_string());
            }
        }

        for row in &rows[at + 1..] {
            let data: Vec<&Cell> = row.iter().filter(|c| !c.is_header).collect();
            if data.len() < 2 {
                continue;
            }
            let mut rec = RawRecord::new();
            for (idx, field) in mapping.iter().enumerate() {
                if let (Some(field), Some(cell)) = (field, data.get(idx)) {
                    rec.set(*field, cell.text.as_str());
                }
            }
            out.records.push(rec);
        }
    }
    Ok(out)
}

/// Absolute archive links on an index page, de-duplicated in page order.
/// A link qualifies when its href contains `must_contain` and does not
/// contain `exclude` (case-insensitive).
pub fn archive_links(html: &str, base: &str, must_contain: &str, exclude: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let base = Url::parse(base)?;
    let anchors = selector("a[href]")?;
    let exclude = exclude.to_lowercase();

    let mut links = MergeSet::new();
    for a in doc.select(&anchors) {
        let Some(href) = a.value().attr("href").map(str::trim) else { continue };
        if !href.contains(must_contain) || href.to_lowercase().contains(&exclude) {
            continue;
        }
        let full = base.join(href)?.to_string();
        let key = full.clone();
        links.insert(&key, full);
    }
    Ok(links.into_vec())
}
