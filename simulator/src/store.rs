//! Key-value storage abstraction for the session layer.
//!
//! The hosting web application persists its session records in browser
//! local storage; headless embedders bring their own backend by
//! implementing [`KvStore`]. The API is fallible so a durable backend can
//! surface its failures, even though the in-memory store never fails.

use std::collections::HashMap;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("storage backend failure: {reason}")]
    Backend { reason: String },
}

/// Minimal string key-value store.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store; the default backend for tests and headless runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.get("missing").unwrap().is_none());

        store.put("key", "value".into()).unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));

        store.put("key", "replaced".into()).unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("replaced"));

        store.remove("key").unwrap();
        assert!(store.get("key").unwrap().is_none());
        // Removing an absent key is fine.
        store.remove("key").unwrap();
    }
}
