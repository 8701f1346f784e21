// src/scrape/paginated.rs
//
// Page-numbered listings: keep asking for the next page until one comes back
// empty or short, or the page bound is hit.

use tracing::{debug, warn};

use crate::config::consts::{MAX_PAGES, PAGE_MIN_RECORDS};
use crate::error::Result;
use crate::merge::MergeSet;
use crate::record::RawRecord;

#[derive(Clone, Copy, Debug)]
pub struct PageLimits {
    /// A page with fewer records than this is taken as the last one.
    pub min_records: usize,
    pub max_pages: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self { min_records: PAGE_MIN_RECORDS, max_pages: MAX_PAGES }
    }
}

/// Walk pages `0, 1, 2, ...` through `fetch_page`, merging by the `key` field.
///
/// A failing page ends the walk; records from earlier pages are kept.
pub fn paginate<F>(mut fetch_page: F, key: &str, limits: PageLimits) -> Vec<RawRecord>
where
    F: FnMut(usize) -> Result<Vec<RawRecord>>,
{
    let mut merged = MergeSet::new();

    for page in 0..limits.max_pages {
        let records = match fetch_page(page) {
            Ok(r) => r,
            Err(e) => {
                warn!(page, error = %e, "page fetch failed; keeping records gathered so far");
                break;
            }
        };
        let found = records.len();
        let added = merged.extend_by(records, |r| r.get(key).map(str::to_string));
        debug!(page, found, added, "page parsed");

        if found == 0 || found < limits.min_records {
            break;
        }
    }

    merged.into_vec()
}
