// src/specs/psu.rs
//! Penn State University Park daily crime log.
//!
//! Layout: a Drupal listing paginated with `?page=N` (page 0 is the bare URL).
//! Each incident is an `<article>` whose `<h2>` reads `INCIDENT #: PSU...` and
//! whose fields sit in `div.field--name-field-<name> .field__item`.
//!
//! The occurred field is sometimes a range, `X to Y`; the end half is kept
//! separately so the normalizer can fold it into the narrative.

use regex::Regex;
use scraper::{ElementRef, Html};

use crate::core::Fetcher;
use crate::core::datetime::DateGrammar;
use crate::core::html::{selector, text_of};
use crate::error::Result;
use crate::normalize::{LocationField, SchemaMap};
use crate::record::{RawBatch, RawRecord};
use crate::scrape::Collector;
use crate::scrape::paginated::{PageLimits, paginate};

pub const SCHOOL_CODE: &str = "003329";
pub const BASE_URL: &str = "https://www.police.psu.edu/daily-crime-log";

const INCIDENT_RE: &str = r"(?i)INCIDENT\s*#\s*:\s*(.+)";

/// (Drupal field name, raw field)
const FIELDS: [(&str, &str); 5] = [
    ("reported", "Reported"),
    ("nature-of-incident1", "Description"),
    ("offenses1", "Offenses"),
    ("location", "Location"),
    ("case-disposition", "Disposition"),
];

pub static SCHEMA: SchemaMap = SchemaMap {
    school_code: SCHOOL_CODE,
    region: "Pennsylvania, USA",
    case_number: "Number",
    occurred: "Occurred",
    reported: Some("Reported"),
    location: LocationField::Single("Location"),
    description: Some("Description"),
    disposition: Some("Disposition"),
    narrative: Some("Offenses"),
    end_occurred: Some("End_Occurred"),
    coordinates: None,
    required: &["Number", "Occurred", "Location"],
    grammars: &[DateGrammar::NumericDate12h, DateGrammar::NumericDate24h],
};

/// `"X to Y"` → `(X, Some(Y))`.
pub fn split_range(text: &str) -> (&str, Option<&str>) {
    match text.split_once(" to ") {
        Some((start, end)) => (start.trim(), Some(end.trim()).filter(|e| !e.is_empty())),
        None => (text.trim(), None),
    }
}

fn field_item(article: ElementRef<'_>, name: &str) -> Result<Option<String>> {
    let sel = selector(&format!("div.field--name-field-{name} .field__item"))?;
    Ok(article.select(&sel).next().map(text_of))
}

/// Every incident on one listing page.
pub fn parse_page(html: &str) -> Result<Vec<RawRecord>> {
    let doc = Html::parse_document(html);
    let articles = selector("article")?;
    let heading = selector("h2")?;
    let number_re = Regex::new(INCIDENT_RE)?;

    let mut out = Vec::new();
    for article in doc.select(&articles) {
        let Some(h2) = article.select(&heading).next() else { continue };
        let title = text_of(h2);
        if !title.contains("INCIDENT") {
            continue;
        }
        let number = number_re
            .captures(&title)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_else(|| title.clone());

        let mut rec = RawRecord::new();
        rec.set("Number", number);

        if let Some(occurred) = field_item(article, "occurred")? {
            let (start, end) = split_range(&occurred);
            rec.set("Occurred", start);
            if let Some(end) = end {
                rec.set("End_Occurred", end);
            }
        }
        for (drupal, field) in FIELDS {
            if let Some(v) = field_item(article, drupal)? {
                rec.set(field, v);
            }
        }
        out.push(rec);
    }
    Ok(out)
}

#[derive(Default)]
pub struct PsuCollector {
    pub limits: PageLimits,
}

impl Collector for PsuCollector {
    fn name(&self) -> &'static str {
        "psu"
    }

    fn school_code(&self) -> &'static str {
        SCHOOL_CODE
    }

    fn collect(&self, fetcher: &dyn Fetcher) -> Result<RawBatch> {
        let records = paginate(
            |page| {
                let body = if page == 0 {
                    fetcher.get(BASE_URL)?
                } else {
                    let n = page.to_string();
                    fetcher.get_query(BASE_URL, &[("page", n.as_str())])?
                };
                parse_page(&body)
            },
            "Number",
            self.limits,
        );
        Ok(RawBatch::from_records(SCHOOL_CODE, records))
    }
}
