use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::StorageLimits;

/// Keys written by a [`BoundaryStore`](super::BoundaryStore) and their
/// serialized sizes, persisted alongside the records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(super) struct StorageIndex {
    #[serde(default)]
    entries: BTreeMap<String, usize>,
}

impl StorageIndex {
    #[inline] pub fn len(&self) -> usize { self.entries.len() }

    #[inline] pub fn keys(&self) -> impl Iterator<Item = &String> { self.entries.keys() }

    pub fn total_bytes(&self) -> usize {
        self.entries.values().sum()
    }

    pub fn insert(&mut self, key: &str, bytes: usize) {
        self.entries.insert(key.to_string(), bytes);
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether writing `bytes` under `key` would break `limits`. An existing
    /// entry for `key` is replaced, not added to.
    pub fn would_exceed(&self, key: &str, bytes: usize, limits: &StorageLimits) -> bool {
        let existing = self.entries.get(key);
        let records = self.len() + usize::from(existing.is_none());
        let total = self.total_bytes() - existing.copied().unwrap_or(0) + bytes;
        records > limits.max_records || total > limits.max_total_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacing_an_entry_does_not_grow_the_index() {
        let limits = StorageLimits { max_records: 1, max_total_bytes: 100 };
        let mut index = StorageIndex::default();
        assert!(!index.would_exceed("a", 60, &limits));
        index.insert("a", 60);

        assert!(!index.would_exceed("a", 90, &limits));
        assert!(index.would_exceed("a", 101, &limits));
        assert!(index.would_exceed("b", 10, &limits));
    }

    #[test]
    fn byte_total_tracks_entries() {
        let mut index = StorageIndex::default();
        index.insert("a", 10);
        index.insert("b", 5);
        assert_eq!(index.total_bytes(), 15);
        assert!(index.remove("a"));
        assert!(!index.remove("a"));
        assert_eq!(index.total_bytes(), 5);
        index.clear();
        assert_eq!(index.len(), 0);
    }
}
