// src/merge.rs
//
// First-seen-wins dedup keyed by a source's incident identifier.

use std::collections::HashSet;

/// Ordered set of items keyed by an identifier. Later items with a key that
/// was already seen are discarded; insertion order is kept.
#[derive(Debug)]
pub struct MergeSet<T> {
    seen: HashSet<String>,
    items: Vec<T>,
}

impl<T> Default for MergeSet<T> {
    fn default() -> Self {
        Self { seen: HashSet::new(), items: Vec::new() }
    }
}

impl<T> MergeSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the item was new.
    pub fn insert(&mut self, key: &str, item: T) -> bool {
        if self.seen.contains(key) {
            return false;
        }
        self.seen.insert(key.to_string());
        self.items.push(item);
        true
    }

    /// Insert everything, returning how many were new.
    pub fn extend_by<I, F>(&mut self, items: I, key: F) -> usize
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> Option<String>,
    {
        let mut added = 0;
        for item in items {
            // Items without a key can't be deduplicated; keep them as they come.
            match key(&item) {
                Some(k) => {
                    if self.insert(&k, item) {
                        added += 1;
                    }
                }
                None => {
                    self.items.push(item);
                    added += 1;
                }
            }
        }
        added
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

/// Dedup a finished list in one go.
pub fn dedup_by_key<T, F>(items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> Option<String>,
{
    let mut set = MergeSet::new();
    set.extend_by(items, key);
    set.into_vec()
}
