//! In-memory storage backend.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{StorageBackend, StorageError};

/// Storage held in a map, with an optional byte quota.
///
/// The quota counts key and value bytes of every entry, like browsers do for
/// `localStorage`. A disabled store fails every call.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<FxHashMap<String, String>>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStorage {
    /// Create an empty store without a quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store holding at most `bytes` bytes.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Create a store that rejects every operation.
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    fn used_bytes_except(items: &FxHashMap<String, String>, key: &str) -> usize {
        items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.disabled {
            return Err(StorageError::Disabled);
        }
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::Disabled);
        }
        let mut items = self.items.write();

        if let Some(quota) = self.quota {
            let available = quota.saturating_sub(Self::used_bytes_except(&items, key));
            let needed = key.len() + value.len();
            if needed > available {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    needed,
                    available,
                });
            }
        }

        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::Disabled);
        }
        self.items.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);

        storage.set_item("k", "v1").unwrap();
        storage.set_item("k", "v2").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.len(), 1);

        storage.remove_item("k").unwrap();
        storage.remove_item("k").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_quota_exceeded() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("ab", "12345678").unwrap();

        let err = storage.set_item("cd", "1").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { available: 0, .. }));

        // Replacing an entry only counts the new value
        storage.set_item("ab", "1234").unwrap();
        assert_eq!(storage.get_item("ab").unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn test_disabled() {
        let storage = MemoryStorage::disabled();
        assert!(matches!(storage.get_item("k"), Err(StorageError::Disabled)));
        assert!(storage.set_item("k", "v").is_err());
        assert!(storage.remove_item("k").is_err());
    }
}
