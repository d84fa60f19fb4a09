//! Subcommand implementations.
//!
//! Every command opens a [`Session`] (storage, cache, bundled snapshot and the
//! live fetcher, all from the loaded config) and drives a page controller with
//! a [`Console`] presenter.

mod cache;
mod catalog;
mod compare;

pub use cache::cache_command;
pub use catalog::{badges_command, list_command, toggle_command};
pub use compare::compare_command;

use anyhow::{Context, Result};
use colored::Colorize;

use tuxdex::{
    cache::PersistentCache,
    config::SiteConfig,
    controller::{Presenter, ViewEvent},
    data::BundledSnapshot,
    debug,
    loader::{DatasetFetcher, DatasetLoader, HttpFetcher},
    log,
    storage::FileStorage,
};

/// Everything a command needs to load the dataset.
pub struct Session {
    cache: PersistentCache<FileStorage>,
    bundled: BundledSnapshot,
    fetcher: Option<HttpFetcher>,
}

impl Session {
    pub fn open(config: &SiteConfig) -> Result<Self> {
        let storage = FileStorage::new(&config.storage.dir);
        debug!("storage"; "using {}", storage.dir().display());

        let cache = PersistentCache::new(storage, config.storage.keys.clone(), config.cache_ttl());
        let bundled = BundledSnapshot::load(&config.dataset.bundled);
        let fetcher = config
            .dataset_url()
            .map(|url| HttpFetcher::new(url, config.fetch_timeout()))
            .transpose()
            .context("Failed to set up the dataset fetcher")?;

        Ok(Self {
            cache,
            bundled,
            fetcher,
        })
    }

    pub fn cache(&self) -> &PersistentCache<FileStorage> {
        &self.cache
    }

    pub fn bundled(&self) -> &BundledSnapshot {
        &self.bundled
    }

    pub fn loader(&self) -> DatasetLoader<'_, FileStorage> {
        let fetcher = self.fetcher.as_ref().map(|f| f as &dyn DatasetFetcher);
        DatasetLoader::new(&self.cache, &self.bundled, fetcher)
    }
}

/// Terminal presenter.
///
/// Status events are logged as they arrive; rendered lists are printed by the
/// command once the controller is done.
#[derive(Debug, Default)]
pub struct Console;

impl Presenter for Console {
    fn present(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::Offline(true) => log!("load"; "{}", "offline: showing saved data".yellow()),
            ViewEvent::Offline(false) => {}
            ViewEvent::LoadFailed(message) => log!("error"; "{message}"),
            ViewEvent::QueryReplaced(Some(query)) => log!("compare"; "share: ?{query}"),
            ViewEvent::QueryReplaced(None) => log!("compare"; "selection cleared"),
            ViewEvent::CatalogRendered(ids) => debug!("load"; "catalog: {} entries", ids.len()),
            ViewEvent::TrayUpdated(ids) | ViewEvent::CompareRendered(ids) => {
                debug!("compare"; "selection: {}", join_ids(&ids));
            }
        }
    }
}

fn join_ids(ids: &[tuxdex::data::DistroId]) -> String {
    if ids.is_empty() {
        return "(empty)".to_owned();
    }
    ids.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
}

/// Pad to `width` columns, then clip with an ellipsis.
fn cell(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return format!("{text:<width$}");
    }
    let clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{clipped}…")
}
