//! `[catalog]` section configuration.

use super::defaults;
use crate::query::SortKey;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[catalog]` section in tuxdex.toml - catalog view behaviour.
///
/// # Example
/// ```toml
/// [catalog]
/// debounce_ms = 250
/// sort = "name"   # popularity | name | beginner | resource
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Delay between the last search/filter input and recomputing the view.
    #[serde(default = "defaults::catalog::debounce_ms")]
    #[educe(Default = defaults::catalog::debounce_ms())]
    pub debounce_ms: u64,

    /// Initial sort order.
    #[serde(default = "defaults::catalog::sort")]
    #[educe(Default = defaults::catalog::sort())]
    pub sort: SortKey,
}
