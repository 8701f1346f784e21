// src/geo/mod.rs
//! Location enrichment: city backfill, the persistent geocode cache, the
//! external geocoder, and the resolver that ties them together.

pub mod backfill;
pub mod cache;
pub mod geocoder;
pub mod resolver;

pub use backfill::CityBackfill;
pub use cache::GeocodeCache;
pub use geocoder::{Geocoder, GoogleGeocoder};
pub use resolver::{LocationResolver, ResolverStats};

/// Round to `decimals` digits after the point.
pub fn round_to(v: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (v * scale).round() / scale
}
