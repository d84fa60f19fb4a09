//! Configuration management for `tuxdex.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[base]`    | Site origin (absent = local-file, offline only)  |
//! | `[dataset]` | Live dataset path, bundled snapshot, timeout     |
//! | `[storage]` | Storage directory, cache TTL, storage keys       |
//! | `[catalog]` | Debounce delay and initial sort                  |
//!
//! # Example
//!
//! ```toml
//! [base]
//! url = "https://bestlinuxdistros.com"
//!
//! [dataset]
//! bundled = "js/distro-data.js"
//!
//! [storage]
//! dir = "~/.cache/tuxdex"
//! ttl_hours = 12
//!
//! [catalog]
//! sort = "name"
//! ```
//!
//! The loaded config is passed explicitly to each component; there is no
//! global config handle.

mod base;
mod catalog;
mod dataset;
pub mod defaults;
mod error;
mod storage;

pub use base::BaseConfig;
pub use catalog::CatalogConfig;
pub use dataset::DatasetConfig;
pub use error::ConfigError;
pub use storage::{StorageConfig, StorageKeys};

use crate::cli::Cli;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing tuxdex.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root (set after loading)
    #[serde(skip)]
    pub root: Option<PathBuf>,

    /// Site origin
    #[serde(default)]
    pub base: BaseConfig,

    /// Dataset sources
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Local storage and cache policy
    #[serde(default)]
    pub storage: StorageConfig,

    /// Catalog view settings
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load config for the given CLI invocation.
    ///
    /// A missing config file is not an error: defaults describe the public site.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = Some(path.to_path_buf())
    }

    /// Absolute URL of the live dataset, `None` in a local-file context.
    pub fn dataset_url(&self) -> Option<String> {
        self.base.url.as_ref().map(|base| {
            format!(
                "{}/{}",
                base.trim_end_matches('/'),
                self.dataset.path.trim_start_matches('/')
            )
        })
    }

    /// Cache time-to-live.
    pub fn cache_ttl(&self) -> chrono::Duration {
        i64::try_from(self.storage.ttl_hours)
            .ok()
            .and_then(chrono::Duration::try_hours)
            .unwrap_or(chrono::Duration::MAX)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.catalog.debounce_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.dataset.timeout_secs)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        if let Some(url) = &cli.base_url {
            self.base.url = Some(url.clone());
        }
        if cli.offline {
            self.base.url = None;
        }

        self.update_path_with_root(&root, &cli.config);
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_name));
        self.dataset.bundled = Self::normalize_path(&root.join(&self.dataset.bundled));

        // Storage dir allows `~`
        let dir = self.storage.dir.to_string_lossy().into_owned();
        let expanded = PathBuf::from(shellexpand::tilde(&dir).into_owned());
        self.storage.dir = if expanded.is_relative() {
            Self::normalize_path(&root.join(expanded))
        } else {
            Self::normalize_path(&expanded)
        };
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        if self.storage.ttl_hours == 0 {
            bail!(ConfigError::Validation(
                "[storage.ttl_hours] must be greater than zero".into()
            ));
        }

        let keys = self.storage.keys.named();
        for (i, (name, key)) in keys.iter().enumerate() {
            if key.trim().is_empty() {
                bail!(ConfigError::Validation(format!(
                    "[storage.keys.{name}] must not be empty"
                )));
            }
            if let Some((other, _)) = keys[i + 1..].iter().find(|(_, k)| k == key) {
                bail!(ConfigError::Validation(format!(
                    "[storage.keys.{name}] and [storage.keys.{other}] share the key `{key}`"
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
