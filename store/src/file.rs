use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::atomic_write::{FileSyncPolicy, atomic_write, recover_bak_file};
use crate::{KeyValueStore, StoreError};

/// Key-value store backed by a single JSON object file.
///
/// Every `set` rewrites the whole file atomically, so a crash mid-write
/// leaves either the old or the new contents on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    sync: FileSyncPolicy,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sync: FileSyncPolicy::SyncAll,
        }
    }

    /// Skip fsync on writes. Intended for tests.
    #[must_use]
    pub fn without_sync(mut self) -> Self {
        self.sync = FileSyncPolicy::SkipSync;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        recover_bak_file(&self.path);
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(err @ StoreError::Parse { .. }) => {
                tracing::warn!("Discarding unreadable store contents: {err}");
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        entries.insert(key.to_string(), value.to_string());
        let bytes = serde_json::to_vec_pretty(&entries)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        atomic_write(&self.path, &bytes, self.sync).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), key, "Store updated");
        Ok(())
    }
}
