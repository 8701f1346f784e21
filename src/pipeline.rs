// src/pipeline.rs
//
// One run: for each selected institution, collect → normalize → dedup →
// backfill city → resolve coordinates → write. Sources run one at a time and
// a failing source never stops the others.

use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::config::options::RunOptions;
use crate::core::Fetcher;
use crate::error::Result;
use crate::geo::{CityBackfill, LocationResolver, ResolverStats};
use crate::merge::dedup_by_key;
use crate::progress::Progress;
use crate::record::CanonicalRecord;
use crate::specs::Institution;
use crate::store;

/// What one source produced before it was written.
#[derive(Debug, Default)]
pub struct SourceOutcome {
    pub records: Vec<CanonicalRecord>,
    pub found: usize,
    pub dropped: usize,
    pub duplicates: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub name: String,
    pub school_code: String,
    pub found: usize,
    pub kept: usize,
    pub dropped: usize,
    pub duplicates: usize,
    pub output: Option<PathBuf>,
    pub error: Option<String>,
    /// Layout changed or handshake broke; needs a human.
    pub structural: bool,
}

impl SourceReport {
    fn new(inst: &Institution) -> Self {
        Self {
            name: inst.name().to_string(),
            school_code: inst.school_code().to_string(),
            found: 0,
            kept: 0,
            dropped: 0,
            duplicates: 0,
            output: None,
            error: None,
            structural: false,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub sources: Vec<SourceReport>,
    pub geocoding: ResolverStats,
}

impl RunReport {
    pub fn failed(&self) -> impl Iterator<Item = &SourceReport> {
        self.sources.iter().filter(|s| !s.succeeded())
    }
}

pub struct Pipeline<'a> {
    fetcher: &'a dyn Fetcher,
    backfill: CityBackfill,
    resolver: LocationResolver,
    out_dir: PathBuf,
}

impl<'a> Pipeline<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, backfill: CityBackfill, resolver: LocationResolver, out_dir: PathBuf) -> Self {
        Self { fetcher, backfill, resolver, out_dir }
    }

    pub fn from_options(opts: &RunOptions, fetcher: &'a dyn Fetcher) -> Result<Self> {
        let backfill = CityBackfill::load(&opts.school_codes_path)?;
        let resolver = LocationResolver::from_options(opts)?;
        Ok(Self::new(fetcher, backfill, resolver, opts.out_dir.clone()))
    }

    /// Collect and enrich one institution without writing anything.
    pub fn run_source(&mut self, inst: &Institution) -> Result<SourceOutcome> {
        let batch = inst.collector.collect(self.fetcher)?;
        let found = batch.found();

        let normalized = inst.schema.normalize(&batch)?;
        let before = normalized.records.len();
        let mut records = dedup_by_key(normalized.records, |r| Some(r.case_number.clone()));
        let duplicates = before - records.len();

        for rec in &mut records {
            rec.location = self.backfill.apply(&rec.location, &rec.school_code);
            self.resolver.resolve(rec, inst.schema.region);
        }

        Ok(SourceOutcome { records, found, dropped: normalized.dropped, duplicates })
    }

    /// Run and write every institution in `institutions`, in order.
    pub fn run(&mut self, institutions: &[Institution], progress: &mut dyn Progress) -> Vec<SourceReport> {
        progress.begin(institutions.len());
        let mut reports = Vec::with_capacity(institutions.len());

        for inst in institutions {
            progress.log(&format!("{} ({})", inst.title, inst.school_code()));
            let mut report = SourceReport::new(inst);

            let written = self.run_source(inst).and_then(|outcome| {
                let path = store::output_path(&self.out_dir, inst.school_code(), inst.slug);
                store::write_records(&path, &outcome.records)?;
                Ok((outcome, path))
            });

            match written {
                Ok((outcome, path)) => {
                    report.found = outcome.found;
                    report.kept = outcome.records.len();
                    report.dropped = outcome.dropped;
                    report.duplicates = outcome.duplicates;
                    info!(
                        school = inst.school_code(),
                        found = report.found,
                        kept = report.kept,
                        dropped = report.dropped,
                        duplicates = report.duplicates,
                        path = %path.display(),
                        "{} written",
                        inst.name()
                    );
                    report.output = Some(path);
                    progress.item_done(inst.school_code(), report.kept);
                }
                Err(e) => {
                    if e.is_structural() {
                        error!(school = inst.school_code(), error = %e, "{} needs attention", inst.name());
                    } else {
                        warn!(school = inst.school_code(), error = %e, "{} failed", inst.name());
                    }
                    report.structural = e.is_structural();
                    report.error = Some(e.to_string());
                    progress.item_failed(inst.school_code(), &e.to_string());
                }
            }
            reports.push(report);
        }

        progress.finish();
        reports
    }

    /// Persist the geocode cache and hand back the lookup counters.
    pub fn finish(mut self) -> Result<ResolverStats> {
        self.resolver.save()?;
        Ok(self.resolver.stats())
    }
}

/// Build a pipeline from `opts`, run the selected institutions, save the cache.
pub fn run_all(opts: &RunOptions, fetcher: &dyn Fetcher, progress: &mut dyn Progress) -> Result<RunReport> {
    let institutions = crate::specs::selected(opts);
    let mut pipeline = Pipeline::from_options(opts, fetcher)?;
    let sources = pipeline.run(&institutions, progress);
    let geocoding = pipeline.finish()?;
    info!(
        cache_hits = geocoding.cache_hits,
        api_calls = geocoding.api_calls,
        failures = geocoding.failures,
        "geocoding summary"
    );
    Ok(RunReport { sources, geocoding })
}
