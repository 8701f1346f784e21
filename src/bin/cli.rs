// src/bin/cli.rs
use color_eyre::eyre::{Result, eyre};
use crime_scrape::cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let report = cli::run()?;

    let failed: Vec<_> = report.failed().map(|s| s.name.as_str()).collect();
    if !failed.is_empty() {
        return Err(eyre!("{} source(s) failed: {}", failed.len(), failed.join(", ")));
    }
    Ok(())
}
