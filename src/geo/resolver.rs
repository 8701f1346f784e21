// src/geo/resolver.rs
//
// Coordinates for canonical records. Priority: coordinates the source
// already published, then the cache, then the external geocoder.

use tracing::{debug, error, warn};

use super::cache::GeocodeCache;
use super::geocoder::{Geocoder, GoogleGeocoder};
use crate::config::consts::ENV_API_KEY;
use crate::config::options::RunOptions;
use crate::error::Result;
use crate::record::CanonicalRecord;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub embedded: usize,
    pub cache_hits: usize,
    pub api_calls: usize,
    pub resolved: usize,
    pub not_found: usize,
    pub failures: usize,
    /// Cache misses that could not be looked up (no geocoder configured).
    pub skipped: usize,
}

pub struct LocationResolver {
    cache: GeocodeCache,
    geocoder: Option<Box<dyn Geocoder>>,
    /// Warn once about the missing key on the first uncached address.
    warn_missing_key: bool,
    stats: ResolverStats,
}

/// Cache key and geocoder query for a location.
pub fn query_for(location: &str, region: &str) -> String {
    format!("{}, {}", location.trim(), region)
}

impl LocationResolver {
    pub fn new(cache: GeocodeCache, geocoder: Option<Box<dyn Geocoder>>) -> Self {
        Self { cache, geocoder, warn_missing_key: false, stats: ResolverStats::default() }
    }

    /// Cache from `opts.cache_path`; Google geocoder when geocoding is on and
    /// a key is configured.
    pub fn from_options(opts: &RunOptions) -> Result<Self> {
        let cache = GeocodeCache::load(&opts.cache_path);
        if !opts.geocode {
            return Ok(Self::new(cache, None));
        }
        match opts.api_key.as_deref() {
            Some(key) => Ok(Self::new(cache, Some(Box::new(GoogleGeocoder::new(key)?)))),
            None => {
                let mut r = Self::new(cache, None);
                r.warn_missing_key = true;
                Ok(r)
            }
        }
    }

    pub fn stats(&self) -> ResolverStats {
        self.stats
    }

    pub fn cache(&self) -> &GeocodeCache {
        &self.cache
    }

    /// Fill `rec`'s coordinates if they can be found. Never fails: lookup
    /// errors are logged and leave the coordinates empty.
    pub fn resolve(&mut self, rec: &mut CanonicalRecord, region: &str) {
        if rec.has_coordinates() {
            self.stats.embedded += 1;
            return;
        }
        if rec.location.trim().is_empty() {
            return;
        }

        let query = query_for(&rec.location, region);
        if let Some(coords) = self.cache.get(&query) {
            self.stats.cache_hits += 1;
            rec.set_coordinates(Some(coords));
            return;
        }

        let Some(geocoder) = self.geocoder.as_ref() else {
            if self.warn_missing_key {
                warn!("{ENV_API_KEY} not set; skipping geocoding for this run");
                self.warn_missing_key = false;
            }
            self.stats.skipped += 1;
            return;
        };

        self.stats.api_calls += 1;
        debug!(query = query.as_str(), "geocoding");
        match geocoder.geocode(&query) {
            Ok(Some(coords)) => {
                self.stats.resolved += 1;
                rec.set_coordinates(Some(coords));
                self.cache.insert(query, coords);
            }
            Ok(None) => self.stats.not_found += 1,
            Err(e) => {
                self.stats.failures += 1;
                error!(query = query.as_str(), error = %e, "geocode lookup failed");
            }
        }
    }

    /// Persist new cache entries.
    pub fn save(&mut self) -> Result<()> {
        self.cache.save()
    }
}
