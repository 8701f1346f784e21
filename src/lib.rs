// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod progress;

pub mod geo;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod scrape;
pub mod specs;

pub mod csv;
pub mod store;

pub use error::{IngestError, Result};
pub use record::{CanonicalRecord, RawBatch, RawRecord};
