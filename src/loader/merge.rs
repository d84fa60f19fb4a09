//! Curated-field merge between the live feed and the bundled snapshot.
//!
//! The live feed is authoritative, except for fields the site curates by hand
//! that the feed may leave empty. Those are taken from the bundled record with
//! the same id.

use crate::data::{BundledSnapshot, DistroRecord};

/// Fill curated fields of `fetched` from `bundled` where the feed has none.
pub fn merge_curated(fetched: DistroRecord, bundled: &DistroRecord) -> DistroRecord {
    let mut merged = fetched;

    if merged.release_model().is_none() {
        merged.release_model = bundled.release_model().map(str::to_owned);
    }
    if merged.popularity_rank.is_none() {
        merged.popularity_rank = bundled.popularity_rank;
    }

    merged
}

/// Merge every fetched record against the snapshot, keeping feed order.
pub fn merge_dataset(fetched: Vec<DistroRecord>, snapshot: &BundledSnapshot) -> Vec<DistroRecord> {
    fetched
        .into_iter()
        .map(|record| match snapshot.get(&record.id) {
            Some(bundled) => merge_curated(record, bundled),
            None => record,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled_x() -> DistroRecord {
        let mut record = DistroRecord::new("x", "X Linux");
        record.release_model = Some("LTS".into());
        record.popularity_rank = Some(5);
        record.category = Some("Desktop".into());
        record
    }

    #[test]
    fn test_missing_release_model_filled() {
        let merged = merge_curated(DistroRecord::new("x", "X"), &bundled_x());

        assert_eq!(merged.release_model.as_deref(), Some("LTS"));
        assert_eq!(merged.popularity_rank, Some(5));
        // Non-curated fields are not copied
        assert!(merged.category.is_none());
        assert_eq!(merged.name, "X");
    }

    #[test]
    fn test_empty_release_model_counts_as_missing() {
        let mut fetched = DistroRecord::new("x", "X");
        fetched.release_model = Some("  ".into());

        assert_eq!(
            merge_curated(fetched, &bundled_x()).release_model.as_deref(),
            Some("LTS")
        );
    }

    #[test]
    fn test_fetched_fields_win() {
        let mut fetched = DistroRecord::new("x", "X");
        fetched.release_model = Some("Rolling".into());
        fetched.popularity_rank = Some(1);

        let merged = merge_curated(fetched, &bundled_x());
        assert_eq!(merged.release_model.as_deref(), Some("Rolling"));
        assert_eq!(merged.popularity_rank, Some(1));
    }

    #[test]
    fn test_merge_dataset_keeps_order_and_unknown_ids() {
        let snapshot = BundledSnapshot::from_records(vec![bundled_x()]);
        let fetched = vec![DistroRecord::new("new", "Brand New"), DistroRecord::new("x", "X")];

        let merged = merge_dataset(fetched, &snapshot);
        assert_eq!(merged[0].id, "new");
        assert!(merged[0].release_model.is_none());
        assert_eq!(merged[1].release_model.as_deref(), Some("LTS"));
    }
}
