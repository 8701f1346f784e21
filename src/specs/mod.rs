// src/specs/mod.rs
//! # Source "specs"
//!
//! One module per institution. Each spec encodes *where the ground truth
//! lives* in that institution's published log and *how to read it*:
//!
//! - the endpoint(s) and transport variant (paginated listing, session
//!   handshake, index + archives, label/value blotter, JSON API, or a
//!   dashboard export file),
//! - the parse functions, testable offline against inline fixtures,
//! - a `SCHEMA` table mapping its raw field names onto canonical records,
//!   including the datetime grammar(s) and the geocoding region.
//!
//! ## What does **not** live here
//! - Canonical validation and cleanup (`normalize`).
//! - Geocoding, city backfill, output files (`geo`, `pipeline`, `store`).
//!
//! ## Typical call chain
//! ```text
//! pipeline::run_all → specs::institutions() → Collector::collect()
//!                                          ↘ RawBatch → SCHEMA.normalize()
//! ```
//!
//! In short: **`specs` knows how to read the sources.** Other layers decide
//! what to keep and where it goes.

pub mod iowa;
pub mod michstate;
pub mod nebraska;
pub mod northwestern;
pub mod osu;
pub mod psu;
pub mod purdue;
pub mod uiuc;
pub mod umich;

use crate::config::options::RunOptions;
use crate::normalize::SchemaMap;
use crate::scrape::Collector;

/// A runnable source: how to collect it and how to read what comes back.
pub struct Institution {
    pub title: &'static str,
    /// Used in output file names.
    pub slug: &'static str,
    pub schema: &'static SchemaMap,
    pub collector: Box<dyn Collector>,
}

impl Institution {
    pub fn name(&self) -> &'static str {
        self.collector.name()
    }

    pub fn school_code(&self) -> &'static str {
        self.schema.school_code
    }
}

/// Every known institution, in run order, configured from `opts`.
pub fn institutions(opts: &RunOptions) -> Vec<Institution> {
    let exports = opts.exports_dir.as_path();
    vec![
        Institution {
            title: "Penn State University Park",
            slug: "psu",
            schema: &psu::SCHEMA,
            collector: Box::new(psu::PsuCollector::default()),
        },
        Institution {
            title: "University of Nebraska-Lincoln",
            slug: "nebraska",
            schema: &nebraska::SCHEMA,
            collector: Box::new(nebraska::NebraskaCollector),
        },
        Institution {
            title: "Purdue University West Lafayette",
            slug: "purdue",
            schema: &purdue::SCHEMA,
            collector: Box::new(purdue::PurdueCollector),
        },
        Institution {
            title: "Northwestern University",
            slug: "northwestern",
            schema: &northwestern::SCHEMA,
            collector: Box::new(northwestern::NorthwesternCollector),
        },
        Institution {
            title: "University of Michigan",
            slug: "umich",
            schema: &umich::SCHEMA,
            collector: Box::new(umich::UmichCollector { dates: opts.dates }),
        },
        Institution {
            title: "Michigan State University",
            slug: "michstate",
            schema: &michstate::SCHEMA,
            collector: Box::new(michstate::MichStateCollector),
        },
        Institution {
            title: "University of Illinois Urbana-Champaign",
            slug: "uiuc",
            schema: &uiuc::SCHEMA,
            collector: Box::new(uiuc::collector(exports)),
        },
        Institution {
            title: "Ohio State University",
            slug: "osu",
            schema: &osu::SCHEMA,
            collector: Box::new(osu::collector(exports)),
        },
        Institution {
            title: "University of Iowa",
            slug: "iowa",
            schema: &iowa::SCHEMA,
            collector: Box::new(iowa::collector(exports)),
        },
    ]
}

/// Institutions picked by `opts.sources`.
pub fn selected(opts: &RunOptions) -> Vec<Institution> {
    institutions(opts)
        .into_iter()
        .filter(|i| opts.sources.matches(i.name(), i.school_code()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::SourceSelector;

    #[test]
    fn registry_is_consistent() {
        let all = institutions(&RunOptions::default());
        assert_eq!(all.len(), 9);
        for inst in &all {
            assert_eq!(inst.collector.school_code(), inst.schema.school_code, "{}", inst.title);
        }
        let mut codes: Vec<_> = all.iter().map(|i| i.school_code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 9);
    }

    #[test]
    fn selection_by_name_or_code() {
        let opts = RunOptions {
            sources: SourceSelector::Only(vec![s!("osu"), s!("002565")]),
            ..RunOptions::default()
        };
        let names: Vec<_> = selected(&opts).iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["nebraska", "osu"]);
    }
}
