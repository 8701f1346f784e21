// src/core/net.rs
//
// Blocking HTTP behind a small trait so every source can be exercised
// offline against captured pages.

use std::cell::RefCell;
use std::collections::HashMap;
use std::thread;
use std::time::{Duration, Instant};

use reqwest::blocking::{Client, RequestBuilder};
use tracing::debug;
use url::Url;

use crate::config::consts::{REQUEST_PAUSE_MS, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::{IngestError, Result};

pub trait Fetcher {
    fn get(&self, url: &str) -> Result<String> {
        self.get_query(url, &[])
    }

    fn get_query(&self, url: &str, query: &[(&str, &str)]) -> Result<String>;

    /// POST `application/x-www-form-urlencoded`. An empty `form` sends an empty body.
    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String>;
}

/// reqwest-backed fetcher. Keeps one cookie jar for the whole run (some
/// archives hand out a session on the first request) and waits a fixed pause
/// between consecutive requests to the same host.
pub struct HttpFetcher {
    client: Client,
    pause: Duration,
    last_hit: RefCell<HashMap<String, Instant>>,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_pause(Duration::from_millis(REQUEST_PAUSE_MS))
    }

    pub fn with_pause(pause: Duration) -> Result<Self> {
        Self::with_settings(pause, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    pub fn with_settings(pause: Duration, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .map_err(|source| IngestError::Transport { url: s!("<client builder>"), source })?;
        Ok(Self { client, pause, last_hit: RefCell::new(HashMap::new()) })
    }

    fn host_of(url: &str) -> String {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_owned))
            .unwrap_or_default()
    }

    fn wait_turn(&self, host: &str) {
        if let Some(prev) = self.last_hit.borrow().get(host) {
            let since = prev.elapsed();
            if since < self.pause {
                thread::sleep(self.pause - since);
            }
        }
    }

    fn send(&self, url: &str, req: RequestBuilder) -> Result<String> {
        let host = Self::host_of(url);
        self.wait_turn(&host);

        let t = Instant::now();
        let result = req.send();
        self.last_hit.borrow_mut().insert(host, Instant::now());

        let resp = result.map_err(|source| IngestError::Transport { url: url.to_string(), source })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(IngestError::Status { url: url.to_string(), status: status.as_u16() });
        }
        let body = resp
            .text()
            .map_err(|source| IngestError::Transport { url: url.to_string(), source })?;
        debug!(url, bytes = body.len(), elapsed = ?t.elapsed(), "fetched");
        Ok(body)
    }
}

impl Fetcher for HttpFetcher {
    fn get_query(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        let mut req = self.client.get(url);
        if !query.is_empty() {
            req = req.query(query);
        }
        self.send(url, req)
    }

    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String> {
        self.send(url, self.client.post(url).form(form))
    }
}
