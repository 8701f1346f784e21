// src/config/options.rs
use std::path::PathBuf;

use chrono::{Days, NaiveDate, Utc};

use super::consts::*;

/// Which institutions to run. Entries match either the short source name
/// (`psu`, `nebraska`, ...) or the school code, case-insensitively.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SourceSelector {
    #[default]
    All,
    Only(Vec<String>),
}

impl SourceSelector {
    pub fn matches(&self, name: &str, school_code: &str) -> bool {
        match self {
            SourceSelector::All => true,
            SourceSelector::Only(wanted) => wanted
                .iter()
                .any(|w| w.eq_ignore_ascii_case(name) || w.trim() == school_code),
        }
    }
}

/// Inclusive calendar range, used by day-by-day API sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub since: NaiveDate,
    pub until: NaiveDate,
}

impl DateRange {
    pub fn new(since: NaiveDate, until: NaiveDate) -> Self {
        Self { since, until }
    }

    /// The `days` days ending at `until` (inclusive).
    pub fn ending_at(until: NaiveDate, days: u64) -> Self {
        let since = until
            .checked_sub_days(Days::new(days.saturating_sub(1)))
            .unwrap_or(until);
        Self { since, until }
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.since.iter_days().take_while(move |d| *d <= self.until)
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::ending_at(Utc::now().date_naive(), 28)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub sources: SourceSelector,
    pub geocode: bool,
    pub api_key: Option<String>,
    pub dates: DateRange,
    pub cache_path: PathBuf,
    pub school_codes_path: PathBuf,
    pub exports_dir: PathBuf,
    pub out_dir: PathBuf,
    pub debug_log: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            sources: SourceSelector::All,
            geocode: true,
            api_key: None,
            dates: DateRange::default(),
            cache_path: PathBuf::from(GEOCODE_CACHE_FILE),
            school_codes_path: PathBuf::from(SCHOOL_CODE_CSV),
            exports_dir: PathBuf::from(DEFAULT_EXPORTS_DIR),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            debug_log: Some(PathBuf::from(DEBUG_LOG)),
        }
    }
}

impl RunOptions {
    /// Defaults, then `.env`, then process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut opts = Self::default();
        opts.api_key = std::env::var(ENV_API_KEY).ok().filter(|k| !k.trim().is_empty());
        if let Ok(p) = std::env::var(ENV_CACHE) {
            opts.cache_path = PathBuf::from(p);
        }
        if let Ok(p) = std::env::var(ENV_OUT_DIR) {
            opts.out_dir = PathBuf::from(p);
        }
        if let Ok(p) = std::env::var(ENV_EXPORTS_DIR) {
            opts.exports_dir = PathBuf::from(p);
        }
        if let Ok(p) = std::env::var(ENV_SCHOOL_CODES) {
            opts.school_codes_path = PathBuf::from(p);
        }
        opts
    }

    pub fn output_path(&self, school_code: &str, slug: &str) -> PathBuf {
        crate::store::output_path(&self.out_dir, school_code, slug)
    }
}
