// src/geo/cache.rs
//
// `{"<address>, <region>": [lat, lon]}` on disk. Only successful lookups are
// ever stored, so a miss today is retried on the next run.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;

#[derive(Debug, Default)]
pub struct GeocodeCache {
    path: Option<PathBuf>,
    entries: BTreeMap<String, (f64, f64)>,
    dirty: bool,
}

impl GeocodeCache {
    /// Empty, in-memory only.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load from `path`. A missing or unreadable file starts an empty cache
    /// that will still be written back to `path`.
    pub fn load(path: &Path) -> Self {
        let entries = match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str::<BTreeMap<String, Option<(f64, f64)>>>(&text) {
                Ok(map) => map.into_iter().filter_map(|(k, v)| v.map(|c| (k, c))).collect(),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "geocode cache unreadable; starting empty");
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        debug!(path = %path.display(), entries = entries.len(), "geocode cache loaded");
        Self { path: Some(path.to_path_buf()), entries, dirty: false }
    }

    pub fn get(&self, key: &str) -> Option<(f64, f64)> {
        self.entries.get(key).copied()
    }

    pub fn insert(&mut self, key: String, coords: (f64, f64)) {
        self.entries.insert(key, coords);
        self.dirty = true;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write back to the file it was loaded from, if anything changed.
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.path.as_deref() else { return Ok(()) };
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, text)?;
        self.dirty = false;
        debug!(path = %path.display(), entries = self.entries.len(), "geocode cache saved");
        Ok(())
    }
}
