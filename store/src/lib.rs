//! Durable key-value storage for KatPhone.
//!
//! The app persists a handful of string values under fixed keys. This crate
//! provides the [`KeyValueStore`] seam and two implementations:
//!
//! - **[`JsonFileStore`]**: one JSON object on disk, rewritten atomically (temp + rename)
//! - **[`MemoryStore`]**: in-process map with write counting and failure injection

mod atomic_write;
mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use atomic_write::{FileSyncPolicy, atomic_write, recover_bak_file};
pub use file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize store contents: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// String-keyed, string-valued durable storage.
pub trait KeyValueStore {
    /// Fetch the value stored under `key`. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, durably, before returning.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
