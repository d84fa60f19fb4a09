//! Search, filter and sort over a dataset snapshot.
//!
//! Everything here is a pure function of its inputs. Derived views borrow the
//! records and never reorder or modify the dataset.
//!
//! ```text
//! records ──► matches_query ──► matches_category ──► sort_data ──► view
//! ```

mod badges;
mod category;
mod fuzzy;
mod sort;

pub use badges::{Badges, build_badges};
pub use category::{Category, SECURITY_IDS, SERVER_IDS, matches_category};
pub use fuzzy::{fuzzy_score, matches_query};
pub use sort::{SortKey, compare_names, sort_data};

use crate::data::DistroRecord;

/// Current values of the catalog search controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub category: Category,
    pub sort: SortKey,
}

impl FilterState {
    pub fn new(query: impl Into<String>, category: Category, sort: SortKey) -> Self {
        Self {
            query: query.into(),
            category,
            sort,
        }
    }

    /// Compute the catalog view for these controls.
    pub fn apply<'a>(&self, records: &'a [DistroRecord]) -> Vec<&'a DistroRecord> {
        let filtered = records.iter().filter(|record| {
            matches_query(record, &self.query) && matches_category(record, &self.category)
        });
        sort_data(filtered, self.sort)
    }
}
