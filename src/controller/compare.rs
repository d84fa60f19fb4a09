//! Compare page: side-by-side view of the selected distributions.
//!
//! A selection given in the page query (`?ids=...`) wins over the stored one
//! for that load and is not written back until the user changes it.

use super::{LOAD_FAILED_MESSAGE, Presenter, ViewEvent};
use crate::{
    cache::PersistentCache,
    compare::CompareSelection,
    data::{Benchmarks, DistroRecord, HardwareSpec},
    debug,
    loader::{DatasetLoader, LoadError, Provenance},
    query::compare_names,
    storage::StorageBackend,
};

/// Placeholder for a value a record does not publish.
const MISSING: &str = "-";

/// One field of the comparison table, one value per compared record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareRow {
    pub label: &'static str,
    pub values: Vec<String>,
}

type FieldFn = fn(&DistroRecord) -> Option<String>;

const FIELDS: &[(&str, FieldFn)] = &[
    ("Category", |r| r.category.clone()),
    ("Package manager", |r| r.package_manager.clone()),
    ("Release model", |r| r.release_model().map(str::to_owned)),
    ("Status", |r| r.status.clone()),
    ("Popularity", |r| r.popularity_rank.map(|rank| format!("#{rank}"))),
    ("Beginner score", |r| score(r, |b| b.beginner_score)),
    ("Power user score", |r| score(r, |b| b.power_user_score)),
    ("Stability score", |r| score(r, |b| b.stability_score)),
    ("Boot time", |r| r.benchmarks.as_ref().and_then(|b| b.boot_time.clone())),
    ("Resource usage", |r| r.resource_usage().map(str::to_owned)),
    ("Minimum CPU", |r| hardware(r, false, |h| h.cpu.clone())),
    ("Minimum RAM", |r| hardware(r, false, |h| h.ram.clone())),
    ("Minimum storage", |r| hardware(r, false, |h| h.storage.clone())),
    ("Recommended RAM", |r| hardware(r, true, |h| h.ram.clone())),
    ("Pros", |r| list(&r.pros)),
    ("Cons", |r| list(&r.cons)),
];

fn score(record: &DistroRecord, pick: fn(&Benchmarks) -> Option<f64>) -> Option<String> {
    record
        .benchmarks
        .as_ref()
        .and_then(pick)
        .map(|value| format!("{value:.1}/10"))
}

fn hardware(
    record: &DistroRecord,
    recommended: bool,
    pick: fn(&HardwareSpec) -> Option<String>,
) -> Option<String> {
    let requirements = record.hardware_requirements.as_ref()?;
    let spec = if recommended {
        requirements.recommended.as_ref()
    } else {
        requirements.minimum.as_ref()
    };
    spec.and_then(pick)
}

fn list(items: &[String]) -> Option<String> {
    (!items.is_empty()).then(|| items.join("; "))
}

pub struct CompareController<'a, S, P> {
    cache: &'a PersistentCache<S>,
    presenter: P,
    dataset: Vec<DistroRecord>,
    provenance: Option<Provenance>,
    selection: CompareSelection,
}

impl<'a, S: StorageBackend, P: Presenter> CompareController<'a, S, P> {
    pub fn new(cache: &'a PersistentCache<S>, presenter: P) -> Self {
        Self {
            cache,
            presenter,
            dataset: Vec::new(),
            provenance: None,
            selection: CompareSelection::new(),
        }
    }

    /// Load the dataset and resolve the selection from `query` or storage.
    pub fn load(&mut self, loader: &DatasetLoader<'_, S>, query: &str) -> Result<Provenance, LoadError> {
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

        self.selection = match CompareSelection::from_query(query, &self.dataset) {
            Some(selection) => {
                debug!("compare"; "selection from query: {:?}", selection.ids());
                selection
            }
            None => {
                let mut stored = CompareSelection::from_ids(self.cache.read_compare_selection());
                if stored.reconcile(&self.dataset) {
                    self.cache.write_compare_selection(stored.ids());
                }
                stored
            }
        };

        self.render();
        Ok(outcome.provenance)
    }

    /// Add a distribution picked in the selector.
    pub fn add(&mut self, id: &str) -> bool {
        let known = self.dataset.iter().any(|record| record.id == id);
        let changed = known && self.selection.add(id);
        if changed {
            self.commit();
        }
        changed
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let changed = self.selection.remove(id);
        if changed {
            self.commit();
        }
        changed
    }

    pub fn clear(&mut self) -> bool {
        let changed = self.selection.clear();
        if changed {
            self.commit();
        }
        changed
    }

    /// Selected records, in selection order.
    pub fn compared(&self) -> Vec<&DistroRecord> {
        self.selection
            .ids()
            .iter()
            .filter_map(|id| self.dataset.iter().find(|record| record.id == *id))
            .collect()
    }

    /// Records offered in the selector: not yet selected, by name.
    pub fn candidates(&self) -> Vec<&DistroRecord> {
        let mut candidates: Vec<&DistroRecord> = self
            .dataset
            .iter()
            .filter(|record| !self.selection.contains(&record.id))
            .collect();
        candidates.sort_by(|a, b| compare_names(&a.name, &b.name));
        candidates
    }

    /// The comparison table for the current selection.
    pub fn rows(&self) -> Vec<CompareRow> {
        let compared = self.compared();
        FIELDS
            .iter()
            .map(|&(label, field)| CompareRow {
                label,
                values: compared
                    .iter()
                    .map(|record| field(record).unwrap_or_else(|| MISSING.to_owned()))
                    .collect(),
            })
            .collect()
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

    /// Persist, sync the query string and re-render after a change.
    fn commit(&mut self) {
        self.cache.write_compare_selection(self.selection.ids());
        self.presenter
            .present(ViewEvent::QueryReplaced(self.selection.to_query()));
        self.render();
    }

    fn render(&mut self) {
        self.presenter
            .present(ViewEvent::CompareRendered(self.selection.ids().to_vec()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::StorageKeys,
        data::{BundledSnapshot, DistroId, HardwareRequirements},
        storage::MemoryStorage,
    };
    use chrono::Duration;

    fn records() -> Vec<DistroRecord> {
        let mut ubuntu = DistroRecord::new("ubuntu", "Ubuntu");
        ubuntu.release_model = Some("LTS".into());
        ubuntu.benchmarks = Some(Benchmarks {
            beginner_score: Some(9.0),
            ..Benchmarks::default()
        });
        ubuntu.hardware_requirements = Some(HardwareRequirements {
            minimum: Some(HardwareSpec {
                ram: Some("4 GB".into()),
                ..HardwareSpec::default()
            }),
            recommended: None,
        });
        ubuntu.pros = vec!["Huge community".into(), "Stable".into()];

        let mut arch = DistroRecord::new("arch", "Arch Linux");
        arch.popularity_rank = Some(3);

        vec![
            ubuntu,
            arch,
            DistroRecord::new("mint", "Linux Mint"),
            DistroRecord::new("debian", "Debian"),
            DistroRecord::new("fedora", "Fedora"),
        ]
    }

    fn cache() -> PersistentCache<MemoryStorage> {
        PersistentCache::new(MemoryStorage::new(), StorageKeys::default(), Duration::hours(12))
    }

    fn ids(list: &[&str]) -> Vec<DistroId> {
        list.iter().map(|id| (*id).into()).collect()
    }

    fn loaded<'a>(
        cache: &'a PersistentCache<MemoryStorage>,
        bundled: &BundledSnapshot,
        query: &str,
    ) -> CompareController<'a, MemoryStorage, Vec<ViewEvent>> {
        let loader = DatasetLoader::new(cache, bundled, None);
        let mut controller = CompareController::new(cache, Vec::new());
        controller.load(&loader, query).unwrap();
        controller
    }

    #[test]
    fn test_query_overrides_storage_without_persisting() {
        let cache = cache();
        cache.write_compare_selection(&ids(&["mint"]));
        let bundled = BundledSnapshot::from_records(records());

        let controller = loaded(&cache, &bundled, "?ids=arch,nope,ubuntu,arch");

        assert_eq!(controller.selection().ids(), ["arch", "ubuntu"]);
        assert_eq!(cache.read_compare_selection(), ids(&["mint"]));
        assert_eq!(
            controller.presenter().as_slice(),
            [
                ViewEvent::Offline(true),
                ViewEvent::CompareRendered(ids(&["arch", "ubuntu"])),
            ]
        );
    }

    #[test]
    fn test_stored_selection_reconciled() {
        let cache = cache();
        cache.write_compare_selection(&ids(&["gone", "debian"]));
        let bundled = BundledSnapshot::from_records(records());

        let controller = loaded(&cache, &bundled, "");

        assert_eq!(controller.selection().ids(), ["debian"]);
        assert_eq!(cache.read_compare_selection(), ids(&["debian"]));
    }

    #[test]
    fn test_mutations_persist_and_replace_query() {
        let cache = cache();
        let bundled = BundledSnapshot::from_records(records());
        let mut controller = loaded(&cache, &bundled, "?ids=ubuntu");
        controller.presenter_mut().clear();

        assert!(controller.add("arch"));
        assert!(!controller.add("arch"));
        assert!(!controller.add("unknown"));
        assert_eq!(cache.read_compare_selection(), ids(&["ubuntu", "arch"]));
        assert_eq!(
            controller.presenter().as_slice(),
            [
                ViewEvent::QueryReplaced(Some("ids=ubuntu,arch".into())),
                ViewEvent::CompareRendered(ids(&["ubuntu", "arch"])),
            ]
        );

        assert!(controller.remove("ubuntu"));
        assert!(!controller.remove("ubuntu"));
        assert!(controller.clear());
        assert!(!controller.clear());
        assert!(cache.read_compare_selection().is_empty());
        assert_eq!(
            controller.presenter().iter().rev().nth(1),
            Some(&ViewEvent::QueryReplaced(None))
        );
    }

    #[test]
    fn test_add_respects_capacity() {
        let cache = cache();
        let bundled = BundledSnapshot::from_records(records());
        let mut controller = loaded(&cache, &bundled, "?ids=ubuntu,arch,mint,debian");

        assert!(!controller.add("fedora"));
        assert_eq!(controller.selection().len(), 4);
    }

    #[test]
    fn test_candidates_exclude_selected_sorted_by_name() {
        let cache = cache();
        let bundled = BundledSnapshot::from_records(records());
        let controller = loaded(&cache, &bundled, "?ids=mint,ubuntu");

        let names: Vec<_> = controller.candidates().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Arch Linux", "Debian", "Fedora"]);

        let compared: Vec<_> = controller.compared().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(compared, ["mint", "ubuntu"]);
    }

    #[test]
    fn test_rows() {
        let cache = cache();
        let bundled = BundledSnapshot::from_records(records());
        let controller = loaded(&cache, &bundled, "?ids=ubuntu,arch");
        let rows = controller.rows();

        let row = |label: &str| {
            rows.iter()
                .find(|row| row.label == label)
                .map(|row| row.values.clone())
                .unwrap()
        };
        assert_eq!(row("Release model"), ["LTS", "-"]);
        assert_eq!(row("Popularity"), ["-", "#3"]);
        assert_eq!(row("Beginner score"), ["9.0/10", "-"]);
        assert_eq!(row("Minimum RAM"), ["4 GB", "-"]);
        assert_eq!(row("Pros"), ["Huge community; Stable", "-"]);
    }

    #[test]
    fn test_empty_selection_has_empty_rows() {
        let cache = cache();
        let bundled = BundledSnapshot::from_records(records());
        let controller = loaded(&cache, &bundled, "");

        assert!(controller.compared().is_empty());
        assert!(controller.rows().iter().all(|row| row.values.is_empty()));
        assert_eq!(controller.candidates().len(), 5);
    }
}
