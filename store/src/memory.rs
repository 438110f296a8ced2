use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{KeyValueStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, String>,
    writes: usize,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-memory store. Clones share the same contents, so a caller can keep a
/// handle for inspection after moving a clone into the app.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .lock()
            .entries
            .insert(key.to_string(), value.to_string());
        store
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of successful `set` calls.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.lock().writes
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.lock().entries.get(key).cloned()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let inner = self.lock();
        if inner.fail_reads {
            return Err(StoreError::Unavailable("reads disabled".to_string()));
        }
        Ok(inner.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        inner.entries.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::KeyValueStore;

    #[test]
    fn clones_share_contents() {
        let handle = MemoryStore::new();
        let mut store = handle.clone();
        store.set("kat_apps", "[]").expect("set");

        assert_eq!(handle.value("kat_apps").as_deref(), Some("[]"));
        assert_eq!(handle.writes(), 1);
    }

    #[test]
    fn injected_failures() {
        let mut store = MemoryStore::with_entry("kat_apps", "[]");
        store.fail_reads(true);
        assert!(store.get("kat_apps").is_err());

        store.fail_writes(true);
        assert!(store.set("kat_apps", "[\"Roblox\"]").is_err());
        assert_eq!(store.writes(), 0);
        assert_eq!(store.value("kat_apps").as_deref(), Some("[]"));
    }
}
