//! Catalog sort orders.
//!
//! All sorts are stable and return a new vector; the input is never reordered.

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

use crate::data::DistroRecord;

/// Rank given to records without a popularity rank.
const UNRANKED: u32 = 999;

/// Catalog sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending popularity rank, unranked last.
    #[default]
    Popularity,
    /// Display name, case-insensitive.
    Name,
    /// Descending beginner score, unscored treated as 0.
    Beginner,
    /// Lightest resource usage first, unknown last.
    Resource,
}

impl SortKey {
    /// Parse a sort key. Unknown keys fall back to popularity.
    pub fn parse(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "name" => Self::Name,
            "beginner" => Self::Beginner,
            "resource" => Self::Resource,
            _ => Self::Popularity,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::Name => "name",
            Self::Beginner => "beginner",
            Self::Resource => "resource",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resource usage tier. Unknown labels sort after every known tier.
fn resource_tier(label: Option<&str>) -> u8 {
    match label.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
        Some("low") => 0,
        Some("medium") => 1,
        Some("high") => 2,
        _ => 3,
    }
}

/// Case-insensitive name order, ties broken by the raw name.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Return the records in the order given by `key`.
pub fn sort_data<'a, I>(records: I, key: SortKey) -> Vec<&'a DistroRecord>
where
    I: IntoIterator<Item = &'a DistroRecord>,
{
    let mut sorted: Vec<&DistroRecord> = records.into_iter().collect();
    match key {
        SortKey::Name => sorted.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortKey::Beginner => sorted.sort_by(|a, b| {
            let a = a.beginner_score().unwrap_or(0.0);
            let b = b.beginner_score().unwrap_or(0.0);
            b.total_cmp(&a)
        }),
        SortKey::Resource => sorted.sort_by_key(|r| resource_tier(r.resource_usage())),
        SortKey::Popularity => sorted.sort_by_key(|r| r.popularity_rank.unwrap_or(UNRANKED)),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Benchmarks;

    fn ids(records: &[&DistroRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.to_string()).collect()
    }

    fn ranked(id: &str, rank: Option<u32>) -> DistroRecord {
        let mut record = DistroRecord::new(id, id);
        record.popularity_rank = rank;
        record
    }

    fn scored(id: &str, beginner: Option<f64>, usage: Option<&str>) -> DistroRecord {
        let mut record = DistroRecord::new(id, id);
        record.benchmarks = Some(Benchmarks {
            beginner_score: beginner,
            resource_usage: usage.map(Into::into),
            ..Benchmarks::default()
        });
        record
    }

    #[test]
    fn test_parse() {
        assert_eq!(SortKey::parse("name"), SortKey::Name);
        assert_eq!(SortKey::parse("Beginner"), SortKey::Beginner);
        assert_eq!(SortKey::parse("resource"), SortKey::Resource);
        assert_eq!(SortKey::parse("popularity"), SortKey::Popularity);
        assert_eq!(SortKey::parse("whatever"), SortKey::Popularity);
    }

    #[test]
    fn test_popularity_unranked_last() {
        let data = vec![ranked("a", Some(2)), ranked("b", None), ranked("c", Some(1))];
        let sorted = sort_data(&data, SortKey::Popularity);

        assert_eq!(ids(&sorted), ["c", "a", "b"]);
        // Input untouched
        assert_eq!(data[0].id, "a");
    }

    #[test]
    fn test_popularity_rank_999_ties_with_unranked() {
        let data = vec![ranked("b", None), ranked("a", Some(999)), ranked("c", Some(1000))];
        assert_eq!(ids(&sort_data(&data, SortKey::Popularity)), ["b", "a", "c"]);
    }

    #[test]
    fn test_name_sort_ordered_and_idempotent() {
        let data: Vec<_> = ["elementary OS", "Arch Linux", "alpine", "Zorin OS", "Pop!_OS", "arch linux"]
            .into_iter()
            .map(|name| DistroRecord::new(name.to_lowercase().replace(' ', "-"), name))
            .collect();

        let sorted = sort_data(&data, SortKey::Name);
        for pair in sorted.windows(2) {
            assert_ne!(compare_names(&pair[0].name, &pair[1].name), Ordering::Greater);
        }

        let again = sort_data(sorted.iter().copied(), SortKey::Name);
        assert_eq!(ids(&again), ids(&sorted));
        assert_eq!(sorted[0].name, "alpine");
    }

    #[test]
    fn test_beginner_descending_missing_as_zero() {
        let data = vec![
            scored("gentoo", Some(2.0), None),
            DistroRecord::new("void", "Void"),
            scored("mint", Some(9.5), None),
            scored("zorin", Some(9.5), None),
        ];
        assert_eq!(
            ids(&sort_data(&data, SortKey::Beginner)),
            ["mint", "zorin", "gentoo", "void"]
        );
    }

    #[test]
    fn test_resource_tiers() {
        let data = vec![
            scored("kde", None, Some("High")),
            scored("odd", None, Some("extreme")),
            DistroRecord::new("none", "None"),
            scored("lxqt", None, Some("low")),
            scored("xfce", None, Some("medium")),
        ];
        assert_eq!(
            ids(&sort_data(&data, SortKey::Resource)),
            ["lxqt", "xfce", "kde", "odd", "none"]
        );
    }

    #[test]
    fn test_sort_key_display() {
        assert_eq!(SortKey::Resource.to_string(), "resource");
        assert_eq!(SortKey::default(), SortKey::Popularity);
    }
}
