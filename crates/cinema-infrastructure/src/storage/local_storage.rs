//! Key-value storage mirroring browser `localStorage` semantics.
//!
//! Each key maps to `<storage_dir>/<key>.json`. Reads distinguish a missing
//! value from an unreadable one so callers can log the corrupt case before
//! falling back.

use super::atomic_json::{AtomicJsonError, AtomicJsonFile};
use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};

/// Result of reading one key.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue<T> {
    /// Nothing stored under the key
    Missing,
    Present(T),
    /// The file exists but could not be read or decoded
    Corrupt(String),
}

impl<T> StoredValue<T> {
    /// Collapses the value to an `Option`, logging corrupt data.
    pub fn or_log(self, key: &str) -> Option<T> {
        match self {
            StoredValue::Missing => None,
            StoredValue::Present(value) => Some(value),
            StoredValue::Corrupt(reason) => {
                tracing::warn!(
                    "[LocalStorage] Ignoring malformed value for '{}': {}",
                    key,
                    reason
                );
                None
            }
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoredValue::Corrupt(_))
    }
}

/// Directory of JSON values addressed by string keys.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get<T>(&self, key: &str) -> StoredValue<T>
    where
        T: Serialize + DeserializeOwned,
    {
        match self.file::<T>(key).load() {
            Ok(Some(value)) => StoredValue::Present(value),
            Ok(None) => StoredValue::Missing,
            Err(e) => StoredValue::Corrupt(e.to_string()),
        }
    }

    pub fn set<T>(&self, key: &str, value: &T) -> Result<(), AtomicJsonError>
    where
        T: Serialize + DeserializeOwned,
    {
        self.file::<T>(key).save(value)
    }

    pub fn remove(&self, key: &str) -> Result<(), AtomicJsonError> {
        self.file::<serde_json::Value>(key).remove()
    }

    /// Read-modify-write of one key under a file lock.
    ///
    /// Missing or corrupt values start from `T::default()`.
    pub fn update<T, F>(&self, key: &str, f: F) -> Result<(), AtomicJsonError>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(&mut T),
    {
        self.file::<T>(key).update(
            |current| match current {
                Ok(value) => value.unwrap_or_default(),
                Err(e) => {
                    tracing::warn!(
                        "[LocalStorage] Overwriting malformed value for '{}': {}",
                        key,
                        e
                    );
                    T::default()
                }
            },
            f,
        )
    }

    fn file<T>(&self, key: &str) -> AtomicJsonFile<T>
    where
        T: Serialize + DeserializeOwned,
    {
        AtomicJsonFile::new(self.root.join(format!("{}.json", file_stem(key))))
    }
}

/// Maps a key to a safe file stem. Keys are fixed constants plus user ids,
/// so anything outside `[A-Za-z0-9_-]` is replaced.
fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
