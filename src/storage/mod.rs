//! Key/value storage in the shape of the browser's `localStorage`.
//!
//! Values are strings; callers serialize their own payloads. Every operation
//! may fail (quota, permissions, disabled storage) and callers decide how much
//! of that to surface. The cache layer swallows all of it.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::{io, path::PathBuf};
use thiserror::Error;

/// Storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage quota exceeded writing `{key}` ({needed} bytes, {available} available)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    #[error("storage is disabled")]
    Disabled,

    #[error("IO error at `{0}`")]
    Io(PathBuf, #[source] io::Error),
}

/// A string key/value store.
pub trait StorageBackend {
    /// Read the value stored under `key`, `Ok(None)` if there is none.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: StorageBackend + ?Sized> StorageBackend for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<S: StorageBackend + ?Sized> StorageBackend for std::sync::Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
