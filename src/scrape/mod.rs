// src/scrape/mod.rs
//! Collector capability and the transport variants sources are built from.
//!
//! A collector turns one institution's published log into a `RawBatch`. It
//! knows transport and layout; it knows nothing about the canonical schema,
//! geocoding, or where results are written.

pub mod api;
pub mod archives;
pub mod export;
pub mod handshake;
pub mod label_value;
pub mod paginated;

use crate::core::Fetcher;
use crate::error::Result;
use crate::record::RawBatch;

pub trait Collector {
    /// Short lowercase source name used on the command line (`psu`, `osu`, ...).
    fn name(&self) -> &'static str;

    fn school_code(&self) -> &'static str;

    fn collect(&self, fetcher: &dyn Fetcher) -> Result<RawBatch>;
}
