//! `[dataset]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[dataset]` section in tuxdex.toml - dataset sources.
///
/// # Example
/// ```toml
/// [dataset]
/// path = "api/linux_distros_full.json"   # relative to [base].url
/// bundled = "js/distro-data.js"          # relative to the project root
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    /// Path of the live JSON document under the site origin.
    #[serde(default = "defaults::dataset::path")]
    #[educe(Default = defaults::dataset::path())]
    pub path: String,

    /// Bundled snapshot written by the site build.
    #[serde(default = "defaults::dataset::bundled")]
    #[educe(Default = defaults::dataset::bundled())]
    pub bundled: PathBuf,

    /// Network timeout for the live fetch.
    #[serde(default = "defaults::dataset::timeout_secs")]
    #[educe(Default = defaults::dataset::timeout_secs())]
    pub timeout_secs: u64,
}
