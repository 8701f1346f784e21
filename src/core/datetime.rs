// src/core/datetime.rs
//
// The datetime grammars seen across the sources. Every grammar yields a UTC
// instant; naive wall-clock values are taken as UTC, values that carry an
// explicit offset are converted.

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};

use super::sanitize::normalize_ws;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateGrammar {
    /// `02/01/2026 19:44`
    NumericDate24h,
    /// `02/01/2026 7:44 PM`
    NumericDate12h,
    /// `2/27/2026 2:44:00 PM`
    NumericDate12hSeconds,
    /// `02/01/26 7:44 PM`
    ShortYear12h,
    /// `02/01/26 19:44`
    ShortYear24h,
    /// `February 01, 2026 at 11:45:00 PM`
    MonthName12hSeconds,
    /// `2026-02-01 19:44:00.0`, `2026-02-01T19:44:00.123456`, RFC 3339
    IsoFractional,
}

impl DateGrammar {
    /// Tried in order when a source's format isn't pinned down. Two-digit
    /// years go before four-digit ones so `26` is never read as year 26.
    pub const FLEXIBLE: &'static [DateGrammar] = &[
        DateGrammar::IsoFractional,
        DateGrammar::ShortYear12h,
        DateGrammar::ShortYear24h,
        DateGrammar::NumericDate12hSeconds,
        DateGrammar::NumericDate12h,
        DateGrammar::NumericDate24h,
        DateGrammar::MonthName12hSeconds,
    ];

    fn formats(self) -> &'static [&'static str] {
        match self {
            DateGrammar::NumericDate24h => &["%m/%d/%Y %H:%M"],
            DateGrammar::NumericDate12h => &["%m/%d/%Y %I:%M %p"],
            DateGrammar::NumericDate12hSeconds => &["%m/%d/%Y %I:%M:%S %p"],
            DateGrammar::ShortYear12h => &["%m/%d/%y %I:%M %p"],
            DateGrammar::ShortYear24h => &["%m/%d/%y %H:%M"],
            DateGrammar::MonthName12hSeconds => &["%B %d, %Y at %I:%M:%S %p"],
            DateGrammar::IsoFractional => &[
                "%Y-%m-%d %H:%M:%S%.f",
                "%Y-%m-%dT%H:%M:%S%.f",
                "%Y-%m-%d %H:%M",
            ],
        }
    }

    /// `%Y` happily takes `26` as year 26; anything before year 100 is
    /// rejected so a short year never slips through a four-digit grammar.
    pub fn parse(self, raw: &str) -> Option<DateTime<Utc>> {
        let text = normalize_ws(raw);
        if text.is_empty() {
            return None;
        }
        if self == DateGrammar::IsoFractional {
            if let Ok(dt) = DateTime::parse_from_rfc3339(&text) {
                return Some(dt.with_timezone(&Utc)).filter(|dt| dt.year() >= 100);
            }
        }
        self.formats()
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&text, fmt).ok())
            .filter(|naive| naive.year() >= 100)
            .map(|naive| naive.and_utc())
    }
}

/// First grammar in `grammars` that accepts `raw`.
pub fn parse_any(grammars: &[DateGrammar], raw: &str) -> Option<DateTime<Utc>> {
    grammars.iter().find_map(|g| g.parse(raw))
}
