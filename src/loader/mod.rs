//! Dataset loading with offline fallback.
//!
//! # Resolution order
//!
//! ```text
//! no origin ───────────────────────────────────────────► bundled   (Bundled)
//! fresh cache ─────────────────────────────────────────► cache     (Cached)
//! fetch ok ──► merge curated fields ──► write cache ───► merged    (Live)
//! fetch err ──► any cached payload, even expired ──────► cache     (CachedFallback)
//!           └─► non-empty bundled snapshot ────────────► bundled   (Bundled)
//!           └─► nothing ───────────────────────────────► LoadError::NoDataset
//! ```

mod fetch;
mod merge;

pub use fetch::{DatasetFetcher, FetchError, HttpFetcher, parse_feed};
pub use merge::{merge_curated, merge_dataset};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
    cache::{CacheRead, PersistentCache},
    data::{BundledSnapshot, DistroRecord},
    debug, log,
    storage::StorageBackend,
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no distribution data available (feed unreachable, nothing cached, no bundled snapshot)")]
    NoDataset,
}

/// Where a loaded dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Fetched from the live feed just now.
    Live,
    /// Fresh copy from the persistent cache.
    Cached,
    /// Cached copy used because the feed failed; may be past its TTL.
    CachedFallback,
    /// The snapshot shipped with the site.
    Bundled,
}

impl Provenance {
    /// Whether the page should show the offline indicator.
    pub const fn is_offline(self) -> bool {
        matches!(self, Self::CachedFallback | Self::Bundled)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Cached => "cached",
            Self::CachedFallback => "cached (offline)",
            Self::Bundled => "bundled",
        }
    }
}

/// A loaded dataset with its provenance.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub records: Vec<DistroRecord>,
    pub provenance: Provenance,
}

impl LoadOutcome {
    fn new(records: Vec<DistroRecord>, provenance: Provenance) -> Self {
        Self {
            records,
            provenance,
        }
    }
}

/// Resolves the dataset from feed, cache and bundled snapshot.
pub struct DatasetLoader<'a, S> {
    cache: &'a PersistentCache<S>,
    bundled: &'a BundledSnapshot,
    /// `None` in a local-file context, where there is no origin to fetch from.
    fetcher: Option<&'a dyn DatasetFetcher>,
}

impl<'a, S: StorageBackend> DatasetLoader<'a, S> {
    pub fn new(
        cache: &'a PersistentCache<S>,
        bundled: &'a BundledSnapshot,
        fetcher: Option<&'a dyn DatasetFetcher>,
    ) -> Self {
        Self {
            cache,
            bundled,
            fetcher,
        }
    }

    pub fn cache(&self) -> &PersistentCache<S> {
        self.cache
    }

    pub fn bundled(&self) -> &BundledSnapshot {
        self.bundled
    }

    pub fn load(&self) -> Result<LoadOutcome, LoadError> {
        self.load_at(Utc::now())
    }

    /// Resolve the dataset, judging cache freshness at `now`.
    pub fn load_at(&self, now: DateTime<Utc>) -> Result<LoadOutcome, LoadError> {
        let Some(fetcher) = self.fetcher else {
            debug!("load"; "no origin configured, using bundled snapshot");
            return self.bundled_outcome();
        };

        let stale = match self.cache.read_dataset_entry(now) {
            CacheRead::Fresh(records) => {
                debug!("load"; "{} records from cache", records.len());
                return Ok(LoadOutcome::new(records, Provenance::Cached));
            }
            CacheRead::Expired(records) => Some(records),
            CacheRead::Missing => None,
        };

        match fetcher.fetch() {
            Ok(fetched) => {
                let merged = merge_dataset(fetched, self.bundled);
                self.cache.write_dataset_cache_at(&merged, now);
                debug!("fetch"; "{} records from live feed", merged.len());
                Ok(LoadOutcome::new(merged, Provenance::Live))
            }
            Err(err) => {
                log!("fetch"; "{}", error_chain(&err));
                if let Some(records) = stale {
                    log!("load"; "using cached copy ({} records)", records.len());
                    return Ok(LoadOutcome::new(records, Provenance::CachedFallback));
                }
                self.bundled_outcome()
            }
        }
    }

    fn bundled_outcome(&self) -> Result<LoadOutcome, LoadError> {
        if self.bundled.is_empty() {
            return Err(LoadError::NoDataset);
        }
        Ok(LoadOutcome::new(
            self.bundled.records().to_vec(),
            Provenance::Bundled,
        ))
    }
}

/// Render an error with its sources, `outer: inner: root`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
