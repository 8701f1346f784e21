// tests/common/mod.rs
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crime_scrape::core::Fetcher;
use crime_scrape::geo::Geocoder;
use crime_scrape::{IngestError, Result};

/// Serves canned bodies keyed by `url?k=v&...` (GET) or `POST url?k=v` (POST).
/// Unknown keys answer 404.
#[derive(Default)]
pub struct FixtureFetcher {
    pages: HashMap<String, String>,
    pub requests: RefCell<Vec<String>>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(mut self, key: &str, body: &str) -> Self {
        self.pages.insert(key.to_string(), body.to_string());
        self
    }

    pub fn post(mut self, key: &str, body: &str) -> Self {
        self.pages.insert(format!("POST {key}"), body.to_string());
        self
    }

    fn key(url: &str, params: &[(&str, &str)]) -> String {
        if params.is_empty() {
            return url.to_string();
        }
        let q: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("{url}?{}", q.join("&"))
    }

    fn serve(&self, key: String) -> Result<String> {
        self.requests.borrow_mut().push(key.clone());
        self.pages
            .get(&key)
            .cloned()
            .ok_or(IngestError::Status { url: key, status: 404 })
    }
}

impl Fetcher for FixtureFetcher {
    fn get_query(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        self.serve(Self::key(url, query))
    }

    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String> {
        self.serve(format!("POST {}", Self::key(url, form)))
    }
}

/// Answers every query with fixed coordinates and counts calls.
pub struct CountingGeocoder {
    pub calls: Rc<Cell<usize>>,
    pub answer: Option<(f64, f64)>,
}

impl CountingGeocoder {
    pub fn new(answer: Option<(f64, f64)>) -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        (Self { calls: calls.clone(), answer }, calls)
    }
}

impl Geocoder for CountingGeocoder {
    fn geocode(&self, _query: &str) -> Result<Option<(f64, f64)>> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.answer)
    }
}

/// Minimal PSU listing page holding one article per id.
pub fn psu_page(ids: &[&str]) -> String {
    let mut html = String::from("<html><body>");
    for id in ids {
        html.push_str(&format!(
            "<article><h2>INCIDENT #: {id}</h2>\
             <div class=\"field--name-field-occurred\"><div class=\"field__item\">02/01/2026 7:44 PM</div></div>\
             <div class=\"field--name-field-location\"><div class=\"field__item\">Old Main</div></div>\
             </article>"
        ));
    }
    html.push_str("</body></html>");
    html
}
