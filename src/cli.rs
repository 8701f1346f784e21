// src/cli.rs
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::config::options::{DateRange, RunOptions, SourceSelector};
use crate::core::HttpFetcher;
use crate::error::Result;
use crate::pipeline::{RunReport, run_all};
use crate::progress::TracingProgress;

#[derive(Debug, Parser)]
#[command(name = "crime_scrape", version, about = "Collect and normalize university crime logs")]
pub struct Args {
    /// Sources to run, by name (psu, nebraska, ...) or school code. Default: all.
    pub sources: Vec<String>,

    /// Skip external geocoding (cached coordinates are still applied).
    #[arg(long)]
    pub no_geocode: bool,

    /// First day requested from day-by-day APIs (YYYY-MM-DD).
    #[arg(long)]
    pub since: Option<NaiveDate>,

    /// Last day requested from day-by-day APIs (YYYY-MM-DD). Default: today.
    #[arg(long)]
    pub until: Option<NaiveDate>,

    /// Output directory for processed CSVs.
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Geocode cache file.
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Directory holding dashboard export files.
    #[arg(long)]
    pub exports: Option<PathBuf>,

    /// Federal school code CSV used for city backfill.
    #[arg(long)]
    pub school_codes: Option<PathBuf>,

    /// Print the known sources and exit.
    #[arg(long)]
    pub list_sources: bool,
}

impl Args {
    /// Environment-derived options with command-line overrides on top.
    pub fn into_options(self, mut opts: RunOptions) -> RunOptions {
        if !self.sources.is_empty() {
            opts.sources = SourceSelector::Only(self.sources);
        }
        if self.no_geocode {
            opts.geocode = false;
        }
        match (self.since, self.until) {
            (Some(since), Some(until)) => opts.dates = DateRange::new(since, until),
            (Some(since), None) => opts.dates.since = since,
            (None, Some(until)) => {
                let days = opts.dates.days().count() as u64;
                opts.dates = DateRange::ending_at(until, days);
            }
            (None, None) => {}
        }
        if let Some(p) = self.out {
            opts.out_dir = p;
        }
        if let Some(p) = self.cache {
            opts.cache_path = p;
        }
        if let Some(p) = self.exports {
            opts.exports_dir = p;
        }
        if let Some(p) = self.school_codes {
            opts.school_codes_path = p;
        }
        opts
    }
}

fn print_sources(opts: &RunOptions) {
    for inst in crate::specs::institutions(opts) {
        println!("{:<14}{}  {}", inst.name(), inst.school_code(), inst.title);
    }
}

fn print_summary(report: &RunReport) {
    for s in &report.sources {
        match &s.error {
            None => println!(
                "{:<14}{}  found {:>5}  kept {:>5}  dropped {:>4}  dup {:>4}",
                s.name, s.school_code, s.found, s.kept, s.dropped, s.duplicates
            ),
            Some(e) => println!("{:<14}{}  FAILED: {e}", s.name, s.school_code),
        }
    }
    let g = report.geocoding;
    println!(
        "geocoding: {} cached, {} looked up, {} not found, {} failed",
        g.cache_hits, g.api_calls, g.not_found, g.failures
    );
}

/// Parse arguments, run, print a summary. Returns the report so the binary
/// can pick an exit code.
pub fn run() -> Result<RunReport> {
    let args = Args::parse();
    let list = args.list_sources;
    let opts = args.into_options(RunOptions::from_env());

    crate::log::init(opts.debug_log.as_deref())?;

    if list {
        print_sources(&opts);
        return Ok(RunReport::default());
    }

    let fetcher = HttpFetcher::new()?;
    let mut progress = TracingProgress::default();
    let report = run_all(&opts, &fetcher, &mut progress)?;
    print_summary(&report);
    Ok(report)
}
