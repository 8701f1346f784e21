// src/geo/geocoder.rs
//
// External geocoding. The trait keeps the resolver testable without a
// network or an API key.

use std::time::Duration;

use serde::Deserialize;

use super::round_to;
use crate::config::consts::{COORD_DECIMALS, GEOCODE_ENDPOINT, GEOCODE_TIMEOUT_SECS, REQUEST_PAUSE_MS};
use crate::core::{Fetcher, HttpFetcher};
use crate::error::{IngestError, Result};

pub trait Geocoder {
    /// `Ok(None)` means the service found nothing; `Err` means the lookup
    /// itself failed. Neither is cached.
    fn geocode(&self, query: &str) -> Result<Option<(f64, f64)>>;
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl GeocodeResponse {
    /// First result's location, rounded. `ZERO_RESULTS` is an empty answer;
    /// any other non-`OK` status is an error carrying the service's message.
    pub fn into_coords(self) -> Result<Option<(f64, f64)>> {
        match self.status.as_str() {
            "OK" => Ok(self.results.first().map(|r| {
                let loc = &r.geometry.location;
                (round_to(loc.lat, COORD_DECIMALS), round_to(loc.lng, COORD_DECIMALS))
            })),
            "ZERO_RESULTS" => Ok(None),
            other => Err(IngestError::Geocode(format!(
                "{other}: {}",
                self.error_message.as_deref().unwrap_or("no message")
            ))),
        }
    }
}

/// Google Geocoding JSON API. Lookups go through a `Fetcher`, so they get
/// the same per-host pause as page requests.
pub struct GoogleGeocoder<F: Fetcher = HttpFetcher> {
    fetcher: F,
    api_key: String,
}

impl GoogleGeocoder {
    pub fn new(api_key: &str) -> Result<Self> {
        let fetcher = HttpFetcher::with_settings(
            Duration::from_millis(REQUEST_PAUSE_MS),
            Duration::from_secs(GEOCODE_TIMEOUT_SECS),
        )?;
        Ok(Self::with_fetcher(fetcher, api_key))
    }
}

impl<F: Fetcher> GoogleGeocoder<F> {
    pub fn with_fetcher(fetcher: F, api_key: &str) -> Self {
        Self { fetcher, api_key: api_key.to_string() }
    }
}

impl<F: Fetcher> Geocoder for GoogleGeocoder<F> {
    fn geocode(&self, query: &str) -> Result<Option<(f64, f64)>> {
        let body = self
            .fetcher
            .get_query(GEOCODE_ENDPOINT, &[("address", query), ("key", self.api_key.as_str())])?;
        serde_json::from_str::<GeocodeResponse>(&body)?.into_coords()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct OneAnswer {
        body: &'static str,
        seen: RefCell<Vec<(String, Vec<(String, String)>)>>,
    }

    impl Fetcher for OneAnswer {
        fn get_query(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
            let q = query.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
            self.seen.borrow_mut().push((url.to_string(), q));
            Ok(self.body.to_string())
        }

        fn post_form(&self, url: &str, _form: &[(&str, &str)]) -> Result<String> {
            Err(IngestError::Status { url: url.to_string(), status: 405 })
        }
    }

    fn parse(body: &str) -> Result<Option<(f64, f64)>> {
        serde_json::from_str::<GeocodeResponse>(body).unwrap().into_coords()
    }

    #[test]
    fn ok_takes_first_result_rounded() {
        let body = r#"{"status": "OK", "results": [
            {"geometry": {"location": {"lat": 42.276543219, "lng": -83.741234567}}},
            {"geometry": {"location": {"lat": 0.0, "lng": 0.0}}}
        ]}"#;
        assert_eq!(parse(body).unwrap(), Some((42.2765432, -83.7412346)));
    }

    #[test]
    fn zero_results_is_empty_and_denied_is_error() {
        assert_eq!(parse(r#"{"status": "ZERO_RESULTS", "results": []}"#).unwrap(), None);
        let err = parse(r#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."}"#)
            .unwrap_err();
        assert!(err.to_string().contains("REQUEST_DENIED: The provided API key is invalid."));
    }

    #[test]
    fn lookup_goes_through_the_fetcher() {
        let fetcher = OneAnswer {
            body: r#"{"status": "OK", "results": [{"geometry": {"location": {"lat": 41.6611, "lng": -91.5302}}}]}"#,
            seen: RefCell::new(Vec::new()),
        };
        let g = GoogleGeocoder::with_fetcher(fetcher, "k3y");
        assert_eq!(g.geocode("Iowa Memorial Union, Iowa, USA").unwrap(), Some((41.6611, -91.5302)));

        let seen = g.fetcher.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, GEOCODE_ENDPOINT);
        assert_eq!(seen[0].1[0], (s!("address"), s!("Iowa Memorial Union, Iowa, USA")));
        assert_eq!(seen[0].1[1], (s!("key"), s!("k3y")));
    }

    #[test]
    fn garbled_body_is_an_error() {
        let fetcher = OneAnswer { body: "<html>quota</html>", seen: RefCell::new(Vec::new()) };
        let g = GoogleGeocoder::with_fetcher(fetcher, "k3y");
        assert!(matches!(g.geocode("x").unwrap_err(), IngestError::Json(_)));
    }
}
