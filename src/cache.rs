//! Persistent cache over local storage.
//!
//! Two slots, both addressed through [`StorageKeys`]:
//!
//! | Slot      | Value                                     |
//! |-----------|-------------------------------------------|
//! | `dataset` | `{"savedAt": <epoch ms>, "data": [...]}`  |
//! | `compare` | `["ubuntu", "arch", ...]`                 |
//!
//! Storage is treated as untrusted: every accessor here is total. Read
//! failures (missing, corrupt, disabled) read as "no data", write failures are
//! dropped after a debug log.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    config::StorageKeys,
    data::{DistroId, DistroRecord},
    debug,
    storage::StorageBackend,
};

/// Maximum number of distributions in a comparison.
pub const MAX_COMPARE: usize = 4;

#[derive(Deserialize)]
struct CachedSnapshot {
    #[serde(rename = "savedAt")]
    saved_at: i64,
    #[serde(default)]
    data: Vec<DistroRecord>,
}

#[derive(Serialize)]
struct CachedSnapshotRef<'a> {
    #[serde(rename = "savedAt")]
    saved_at: i64,
    data: &'a [DistroRecord],
}

#[derive(Deserialize)]
struct SavedAtOnly {
    #[serde(rename = "savedAt")]
    saved_at: i64,
}

/// Outcome of reading the dataset slot.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheRead {
    /// Saved within the TTL.
    Fresh(Vec<DistroRecord>),
    /// Older than the TTL. The slot has already been cleared.
    Expired(Vec<DistroRecord>),
    /// Nothing usable stored.
    Missing,
}

impl CacheRead {
    /// The fresh payload only.
    pub fn fresh(self) -> Option<Vec<DistroRecord>> {
        match self {
            Self::Fresh(records) => Some(records),
            _ => None,
        }
    }

    /// Any payload, fresh or expired.
    pub fn any(self) -> Option<Vec<DistroRecord>> {
        match self {
            Self::Fresh(records) | Self::Expired(records) => Some(records),
            Self::Missing => None,
        }
    }
}

/// Dataset and compare-selection cache.
#[derive(Debug, Clone)]
pub struct PersistentCache<S> {
    storage: S,
    keys: StorageKeys,
    ttl: Duration,
}

impl<S: StorageBackend> PersistentCache<S> {
    pub fn new(storage: S, keys: StorageKeys, ttl: Duration) -> Self {
        Self { storage, keys, ttl }
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Read the cached dataset if it is still fresh.
    pub fn read_dataset_cache(&self) -> Option<Vec<DistroRecord>> {
        self.read_dataset_entry(Utc::now()).fresh()
    }

    /// Read and classify the dataset slot at time `now`.
    ///
    /// An expired entry is deleted from storage before its payload is returned,
    /// so a second read reports [`CacheRead::Missing`].
    pub fn read_dataset_entry(&self, now: DateTime<Utc>) -> CacheRead {
        let Some(snapshot) = self.read_json::<CachedSnapshot>(&self.keys.dataset) else {
            return CacheRead::Missing;
        };

        let age_ms = now.timestamp_millis().saturating_sub(snapshot.saved_at);
        if age_ms > self.ttl.num_milliseconds() {
            debug!("cache"; "dataset snapshot expired ({}s old)", age_ms / 1000);
            self.remove(&self.keys.dataset);
            return CacheRead::Expired(snapshot.data);
        }

        CacheRead::Fresh(snapshot.data)
    }

    /// Store `records` stamped with the current time.
    pub fn write_dataset_cache(&self, records: &[DistroRecord]) {
        self.write_dataset_cache_at(records, Utc::now());
    }

    pub fn write_dataset_cache_at(&self, records: &[DistroRecord], now: DateTime<Utc>) {
        let snapshot = CachedSnapshotRef {
            saved_at: now.timestamp_millis(),
            data: records,
        };
        self.write_json(&self.keys.dataset, &snapshot);
    }

    /// When the cached dataset was saved, regardless of age.
    pub fn dataset_saved_at(&self) -> Option<DateTime<Utc>> {
        self.read_json::<SavedAtOnly>(&self.keys.dataset)
            .and_then(|s| DateTime::from_timestamp_millis(s.saved_at))
    }

    pub fn clear_dataset_cache(&self) {
        self.remove(&self.keys.dataset);
    }

    /// Read the stored compare selection.
    ///
    /// Anything other than a JSON array reads as empty; non-string entries are
    /// skipped and the result holds at most [`MAX_COMPARE`] ids.
    pub fn read_compare_selection(&self) -> Vec<DistroId> {
        let Some(Value::Array(items)) = self.read_json::<Value>(&self.keys.compare) else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(Value::as_str)
            .take(MAX_COMPARE)
            .map(DistroId::from)
            .collect()
    }

    pub fn write_compare_selection(&self, ids: &[DistroId]) {
        self.write_json(&self.keys.compare, &ids);
    }

    // ------------------------------------------------------------------------
    // Storage helpers
    // ------------------------------------------------------------------------

    fn read_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.get_item(key) {
            Ok(raw) => raw?,
            Err(err) => {
                debug!("cache"; "read `{key}` failed: {err}");
                return None;
            }
        };

        serde_json::from_str(&raw)
            .inspect_err(|err| debug!("cache"; "`{key}` is corrupt: {err}"))
            .ok()
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(|err| err.to_string())
            .and_then(|json| {
                self.storage
                    .set_item(key, &json)
                    .map_err(|err| err.to_string())
            });

        if let Err(err) = result {
            debug!("cache"; "write `{key}` skipped: {err}");
        }
    }

    fn remove(&self, key: &str) {
        if let Err(err) = self.storage.remove_item(key) {
            debug!("cache"; "remove `{key}` failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn cache() -> PersistentCache<MemoryStorage> {
        PersistentCache::new(MemoryStorage::new(), StorageKeys::default(), Duration::hours(12))
    }

    fn records() -> Vec<DistroRecord> {
        vec![DistroRecord::new("ubuntu", "Ubuntu"), DistroRecord::new("arch", "Arch Linux")]
    }

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_dataset_roundtrip_fresh() {
        let cache = cache();
        cache.write_dataset_cache(&records());

        assert_eq!(cache.read_dataset_cache(), Some(records()));
    }

    #[test]
    fn test_dataset_ttl_boundary() {
        let cache = cache();
        let saved = at("2025-01-01T00:00:00Z");
        cache.write_dataset_cache_at(&records(), saved);

        let just_before = saved + Duration::hours(11) + Duration::minutes(59);
        assert_eq!(cache.read_dataset_entry(just_before), CacheRead::Fresh(records()));

        let just_after = saved + Duration::hours(12) + Duration::minutes(1);
        assert_eq!(cache.read_dataset_entry(just_after), CacheRead::Expired(records()));

        // The expired entry was deleted on the first read
        assert_eq!(cache.read_dataset_entry(just_before), CacheRead::Missing);
    }

    #[test]
    fn test_dataset_exactly_at_ttl_is_fresh() {
        let cache = cache();
        let saved = at("2025-01-01T00:00:00Z");
        cache.write_dataset_cache_at(&records(), saved);

        assert!(matches!(
            cache.read_dataset_entry(saved + Duration::hours(12)),
            CacheRead::Fresh(_)
        ));
    }

    #[test]
    fn test_dataset_corrupt_reads_missing() {
        let storage = MemoryStorage::new();
        storage.set_item("bld-distro-cache-v1", "{not json").unwrap();
        let cache = PersistentCache::new(&storage, StorageKeys::default(), Duration::hours(12));

        assert_eq!(cache.read_dataset_entry(Utc::now()), CacheRead::Missing);
        assert!(cache.read_dataset_cache().is_none());
        assert!(cache.dataset_saved_at().is_none());
    }

    #[test]
    fn test_dataset_wrong_shape_reads_missing() {
        let storage = MemoryStorage::new();
        storage.set_item("bld-distro-cache-v1", r#"{"data": []}"#).unwrap();
        let cache = PersistentCache::new(&storage, StorageKeys::default(), Duration::hours(12));

        assert_eq!(cache.read_dataset_entry(Utc::now()), CacheRead::Missing);
    }

    #[test]
    fn test_dataset_with_null_fields_reads_fresh() {
        let storage = MemoryStorage::new();
        let entry = format!(
            r#"{{"savedAt": {}, "data": [{{"id": "a", "name": null, "pros": null}}]}}"#,
            Utc::now().timestamp_millis()
        );
        storage.set_item("bld-distro-cache-v1", &entry).unwrap();
        let cache = PersistentCache::new(&storage, StorageKeys::default(), Duration::hours(12));

        let records = cache.read_dataset_cache().unwrap();
        assert_eq!(records[0].id, "a");
        assert!(records[0].pros.is_empty());
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let cache = PersistentCache::new(
            MemoryStorage::with_quota(16),
            StorageKeys::default(),
            Duration::hours(12),
        );
        cache.write_dataset_cache(&records());
        cache.write_compare_selection(&["ubuntu".into()]);

        assert!(cache.read_dataset_cache().is_none());

        let disabled = PersistentCache::new(MemoryStorage::disabled(), StorageKeys::default(), Duration::hours(1));
        disabled.write_dataset_cache(&records());
        disabled.clear_dataset_cache();
        assert!(disabled.read_dataset_cache().is_none());
        assert!(disabled.read_compare_selection().is_empty());
    }

    #[test]
    fn test_dataset_saved_at_and_clear() {
        let cache = cache();
        let saved = at("2024-06-30T12:00:00Z");
        cache.write_dataset_cache_at(&records(), saved);

        assert_eq!(cache.dataset_saved_at(), Some(saved));
        cache.clear_dataset_cache();
        assert!(cache.dataset_saved_at().is_none());
    }

    #[test]
    fn test_compare_selection_roundtrip() {
        let cache = cache();
        let ids: Vec<DistroId> = vec!["arch".into(), "void".into()];
        cache.write_compare_selection(&ids);

        assert_eq!(cache.read_compare_selection(), ids);
    }

    #[test]
    fn test_compare_selection_truncated() {
        let cache = cache();
        let ids: Vec<DistroId> = ["a", "b", "c", "d", "e", "f"].into_iter().map(DistroId::from).collect();
        cache.write_compare_selection(&ids);

        assert_eq!(cache.read_compare_selection(), &ids[..4]);
    }

    #[test]
    fn test_compare_selection_garbage() {
        let storage = MemoryStorage::new();
        let cache = PersistentCache::new(&storage, StorageKeys::default(), Duration::hours(12));

        storage.set_item("bld-compare-queue", r#"{"ids": ["a"]}"#).unwrap();
        assert!(cache.read_compare_selection().is_empty());

        storage.set_item("bld-compare-queue", "nope").unwrap();
        assert!(cache.read_compare_selection().is_empty());

        storage.set_item("bld-compare-queue", r#"["a", 3, null, "b"]"#).unwrap();
        assert_eq!(cache.read_compare_selection(), ["a", "b"]);
    }

    #[test]
    fn test_custom_keys_are_used() {
        let storage = MemoryStorage::new();
        let keys = StorageKeys {
            compare: "other-compare".into(),
            ..StorageKeys::default()
        };
        let cache = PersistentCache::new(&storage, keys, Duration::hours(12));
        cache.write_compare_selection(&["mint".into()]);

        assert!(storage.get_item("bld-compare-queue").unwrap().is_none());
        assert_eq!(storage.get_item("other-compare").unwrap().as_deref(), Some(r#"["mint"]"#));
    }
}
