//! Catalog page: searchable grid plus the compare tray.

use std::time::{Duration, Instant};

use super::{Debouncer, LOAD_FAILED_MESSAGE, Presenter, ViewEvent, record_ids};
use crate::{
    cache::PersistentCache,
    compare::CompareSelection,
    data::DistroRecord,
    debug,
    loader::{DatasetLoader, LoadError, Provenance},
    query::{Category, FilterState, SortKey},
    storage::StorageBackend,
};

pub struct CatalogController<'a, S, P> {
    cache: &'a PersistentCache<S>,
    presenter: P,
    dataset: Vec<DistroRecord>,
    provenance: Option<Provenance>,
    filters: FilterState,
    selection: CompareSelection,
    debouncer: Debouncer,
}

impl<'a, S: StorageBackend, P: Presenter> CatalogController<'a, S, P> {
    pub fn new(cache: &'a PersistentCache<S>, presenter: P, sort: SortKey, debounce: Duration) -> Self {
        Self {
            cache,
            presenter,
            dataset: Vec::new(),
            provenance: None,
            filters: FilterState::new("", Category::All, sort),
            selection: CompareSelection::new(),
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Load the dataset and the stored selection, then render grid and tray.
    pub fn load(&mut self, loader: &DatasetLoader<'_, S>) -> Result<Provenance, LoadError> {
        self.selection = CompareSelection::from_ids(self.cache.read_compare_selection());

        let outcome = match loader.load() {
            Ok(outcome) => outcome,
            Err(err) => {
                self.presenter.present(ViewEvent::LoadFailed(LOAD_FAILED_MESSAGE.to_owned()));
                return Err(err);
            }
        };

        self.dataset = outcome.records;
        self.provenance = Some(outcome.provenance);
        self.presenter
            .present(ViewEvent::Offline(outcome.provenance.is_offline()));

        if self.selection.reconcile(&self.dataset) {
            debug!("compare"; "dropped unknown ids from stored selection");
            self.cache.write_compare_selection(self.selection.ids());
        }

        self.refresh();
        self.update_tray();
        Ok(outcome.provenance)
    }

    pub fn set_query(&mut self, query: impl Into<String>, now: Instant) {
        self.filters.query = query.into();
        self.debouncer.schedule(now);
    }

    pub fn set_category(&mut self, category: Category, now: Instant) {
        self.filters.category = category;
        self.debouncer.schedule(now);
    }

    pub fn set_sort(&mut self, sort: SortKey, now: Instant) {
        self.filters.sort = sort;
        self.debouncer.schedule(now);
    }

    /// Run the debounced refresh if its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let fired = self.debouncer.fire(now);
        if fired {
            self.refresh();
        }
        fired
    }

    /// Re-render the grid from the current controls immediately.
    pub fn refresh(&mut self) {
        self.debouncer.cancel();
        let ids = record_ids(self.filters.apply(&self.dataset));
        self.presenter.present(ViewEvent::CatalogRendered(ids));
    }

    /// Add or remove a catalog entry from the compare tray.
    ///
    /// Ids that are not in the dataset are ignored, as are adds to a full tray.
    pub fn toggle_compare(&mut self, id: &str) -> bool {
        if !self.dataset.iter().any(|record| record.id == id) {
            return false;
        }
        if !self.selection.toggle(id) {
            debug!("compare"; "tray is full, `{id}` not added");
            return false;
        }

        self.cache.write_compare_selection(self.selection.ids());
        self.update_tray();
        true
    }

    /// The catalog as currently filtered and sorted.
    pub fn view(&self) -> Vec<&DistroRecord> {
        self.filters.apply(&self.dataset)
    }

    pub fn dataset(&self) -> &[DistroRecord] {
        &self.dataset
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn selection(&self) -> &CompareSelection {
        &self.selection
    }

    pub fn provenance(&self) -> Option<Provenance> {
        self.provenance
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    fn update_tray(&mut self) {
        self.presenter
            .present(ViewEvent::TrayUpdated(self.selection.ids().to_vec()));
    }
}
