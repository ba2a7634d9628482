use ahash::AHashMap;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::error::StoreError;

/// A string-keyed store of JSON values.
///
/// This is the only seam between the pipeline and persistence; expiry,
/// durability and quota are the backend's business.
pub trait KeyValueStore {
    fn put(&mut self, key: &str, value: &Value) -> Result<(), StoreError>;
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn put(&mut self, key: &str, value: &Value) -> Result<(), StoreError> { (**self).put(key, value) }
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> { (**self).get(key) }
    fn remove(&mut self, key: &str) -> Result<(), StoreError> { (**self).remove(key) }
}

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    bytes: usize,
    expires_at: Option<DateTime<Utc>>,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|t| now >= t)
    }
}

/// In-process store modelled on browser session storage: an optional byte
/// quota over serialized values and an optional time-to-live per entry.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: AHashMap<String, Entry>,
    quota_bytes: Option<usize>,
    ttl: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    /// Reject writes that would bring the total serialized size above `bytes`.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    /// Entries read as absent once `ttl` has passed since they were written.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.entries.values().filter(|e| !e.is_expired(now)).count()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Total serialized size of live entries.
    pub fn used_bytes(&self) -> usize {
        let now = Utc::now();
        self.entries.values().filter(|e| !e.is_expired(now)).map(|e| e.bytes).sum()
    }

    /// Drop expired entries.
    pub fn purge_expired(&mut self) {
        let now = Utc::now();
        self.entries.retain(|_, e| !e.is_expired(now));
    }
}

impl KeyValueStore for MemoryStore {
    fn put(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.purge_expired();
        let bytes = key.len() + serde_json::to_string(value)?.len();

        if let Some(limit) = self.quota_bytes {
            let others: usize = self.entries.iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, e)| e.bytes)
                .sum();
            if others + bytes > limit {
                return Err(StoreError::QuotaExceeded { needed: others + bytes, limit });
            }
        }

        let expires_at = self.ttl.map(|ttl| Utc::now() + ttl);
        self.entries.insert(key.to_string(), Entry { value: value.clone(), bytes, expires_at });
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let now = Utc::now();
        Ok(self.entries.get(key).filter(|e| !e.is_expired(now)).map(|e| e.value.clone()))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn put_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.put("a", &json!({"x": 1})).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(json!({"x": 1})));
        assert_eq!(store.len(), 1);

        store.put("a", &json!({"x": 2})).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(json!({"x": 2})));
        assert_eq!(store.len(), 1);

        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn quota_counts_other_entries_only() {
        // "k1" + `"0123456789"` = 2 + 12 bytes
        let mut store = MemoryStore::new().with_quota(30);
        store.put("k1", &json!("0123456789")).unwrap();
        assert_eq!(store.used_bytes(), 14);

        // overwriting the same key does not double count
        store.put("k1", &json!("0123456789")).unwrap();
        store.put("k2", &json!("0123456789")).unwrap();

        let err = store.put("k3", &json!("0123456789")).unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { needed: 42, limit: 30 }));
        assert_eq!(store.get("k3").unwrap(), None);
    }

    #[test]
    fn expired_entries_read_as_absent() {
        let mut store = MemoryStore::new().with_ttl(Duration::zero());
        store.put("k", &json!(1)).unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        assert_eq!(store.len(), 0);

        let mut store = MemoryStore::new().with_ttl(Duration::hours(24));
        store.put("k", &json!(1)).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(json!(1)));
    }

    #[test]
    fn works_through_a_mutable_reference() {
        fn write(mut store: impl KeyValueStore) {
            store.put("k", &json!(true)).unwrap();
        }

        let mut store = MemoryStore::new();
        write(&mut store);
        assert_eq!(store.get("k").unwrap(), Some(json!(true)));
    }
}
