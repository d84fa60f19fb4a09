//! Compare selection: up to [`MAX_COMPARE`] distinct distribution ids.
//!
//! The selection is shared between the catalog tray and the compare page
//! through the `compare` storage slot. On the compare page the `ids` query
//! parameter overrides the stored value for that load.
//!
//! Mutations never fail. Over-capacity adds, unknown ids and repeated removals
//! are no-ops, reported through the returned `bool` (`true` when the
//! selection changed).

mod url;

pub use url::{IDS_PARAM, ids_query, parse_ids_param};

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

pub use crate::cache::MAX_COMPARE;
use crate::data::{DistroId, DistroRecord};

/// Ordered set of selected ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareSelection {
    ids: SmallVec<[DistroId; MAX_COMPARE]>,
}

impl CompareSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from raw ids: trimmed, blanks and duplicates dropped,
    /// truncated to capacity.
    pub fn from_ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut selection = Self::new();
        for id in ids {
            if selection.is_full() {
                break;
            }
            selection.add(id.as_ref().trim());
        }
        selection
    }

    /// Selection requested by a compare-page query string.
    ///
    /// `None` when the query has no usable `ids` parameter. Ids missing from
    /// `dataset` are dropped before truncation.
    pub fn from_query(query: &str, dataset: &[DistroRecord]) -> Option<Self> {
        let known = known_ids(dataset);
        let requested = parse_ids_param(query)?;
        Some(Self::from_ids(
            requested.iter().filter(|id| known.contains(id.as_str())),
        ))
    }

    /// Query string for this selection, `None` when empty.
    pub fn to_query(&self) -> Option<String> {
        ids_query(&self.ids)
    }

    pub fn ids(&self) -> &[DistroId] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|selected| selected == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_COMPARE
    }

    /// Remove `id` if selected, otherwise append it when there is room.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.contains(id) {
            self.remove(id)
        } else {
            self.add(id)
        }
    }

    /// Append `id` unless it is blank, already selected, or the selection is full.
    pub fn add(&mut self, id: &str) -> bool {
        if id.is_empty() || self.is_full() || self.contains(id) {
            return false;
        }
        self.ids.push(id.into());
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|selected| selected != id);
        self.ids.len() != before
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.ids.is_empty();
        self.ids.clear();
        changed
    }

    /// Drop ids that no longer exist in `dataset`.
    pub fn reconcile(&mut self, dataset: &[DistroRecord]) -> bool {
        let known = known_ids(dataset);
        let before = self.ids.len();
        self.ids.retain(|id| known.contains(id.as_str()));
        self.ids.len() != before
    }
}

fn known_ids(dataset: &[DistroRecord]) -> FxHashSet<&str> {
    dataset.iter().map(|record| record.id.as_str()).collect()
}
