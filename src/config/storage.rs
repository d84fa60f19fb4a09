//! `[storage]` section configuration.
//!
//! Holds the storage keys registry: every component addressing local storage
//! resolves its key through [`StorageKeys`], never a literal.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[storage]` section in tuxdex.toml - local storage location and cache policy.
///
/// # Example
/// ```toml
/// [storage]
/// dir = "~/.cache/tuxdex"
/// ttl_hours = 12
///
/// [storage.keys]
/// compare = "my-compare-queue"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Directory holding stored values (`~` is expanded).
    #[serde(default = "defaults::storage::dir")]
    #[educe(Default = defaults::storage::dir())]
    pub dir: PathBuf,

    /// Age after which a cached dataset is no longer served as fresh.
    #[serde(default = "defaults::storage::ttl_hours")]
    #[educe(Default = defaults::storage::ttl_hours())]
    pub ttl_hours: u64,

    #[serde(default)]
    pub keys: StorageKeys,
}

/// Storage keys shared by every page and component.
#[derive(Debug, Clone, PartialEq, Eq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct StorageKeys {
    /// Timestamped dataset snapshot.
    #[serde(default = "defaults::storage::keys::dataset")]
    #[educe(Default = defaults::storage::keys::dataset())]
    pub dataset: String,

    /// Compare selection queue.
    #[serde(default = "defaults::storage::keys::compare")]
    #[educe(Default = defaults::storage::keys::compare())]
    pub compare: String,

    /// Recently viewed detail pages (written by detail pages).
    #[serde(default = "defaults::storage::keys::recent")]
    #[educe(Default = defaults::storage::keys::recent())]
    pub recent: String,
}

impl StorageKeys {
    /// All keys with their config field names.
    pub fn named(&self) -> [(&'static str, &str); 3] {
        [
            ("dataset", self.dataset.as_str()),
            ("compare", self.compare.as_str()),
            ("recent", self.recent.as_str()),
        ]
    }
}
