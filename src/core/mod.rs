// src/core/mod.rs

pub mod datetime;
pub mod encoding;
pub mod html;
pub mod net;
pub mod sanitize;

pub use datetime::DateGrammar;
pub use encoding::TextEncoding;
pub use net::{Fetcher, HttpFetcher};
