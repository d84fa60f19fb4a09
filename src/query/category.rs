//! Category filters.
//!
//! | Category   | Matches when                                            |
//! |------------|---------------------------------------------------------|
//! | `all`      | always                                                  |
//! | `beginner` | category mentions it, or `beginner_score >= 8`          |
//! | `server`   | category mentions it, or id in [`SERVER_IDS`]           |
//! | `security` | category mentions it, or id in [`SECURITY_IDS`]         |
//! | `rolling`  | category mentions it, or release model is "Rolling"     |
//! | `lts`      | category mentions it, or release model is "LTS"         |
//! | other      | category mentions it                                    |
//!
//! "Mentions" is a case-insensitive substring test.

use std::fmt;

use compact_str::CompactString;

use crate::data::DistroRecord;

/// Distributions filed under `server` regardless of their category text.
pub const SERVER_IDS: &[&str] = &["debian", "rhel", "centos", "almalinux", "rocky", "clearlinux"];

/// Distributions filed under `security` regardless of their category text.
pub const SECURITY_IDS: &[&str] = &["kali", "tails", "parrot", "qubes"];

/// Beginner score at or above which a distribution counts as beginner friendly.
const BEGINNER_SCORE_THRESHOLD: f64 = 8.0;

/// A catalog category filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    /// Lower-cased category name.
    Named(CompactString),
}

impl Category {
    /// Parse a category name. Blank or `all` (any case) selects everything.
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(name.to_lowercase().into())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Named(name) => name.as_str(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check whether a record belongs to a category.
pub fn matches_category(record: &DistroRecord, category: &Category) -> bool {
    let Category::Named(name) = category else {
        return true;
    };
    let name = name.as_str();

    let mentioned = record
        .category
        .as_deref()
        .is_some_and(|c| c.to_lowercase().contains(name));
    if mentioned {
        return true;
    }

    match name {
        "beginner" => record
            .beginner_score()
            .is_some_and(|score| score >= BEGINNER_SCORE_THRESHOLD),
        "server" => SERVER_IDS.contains(&record.id.as_str()),
        "security" => SECURITY_IDS.contains(&record.id.as_str()),
        "rolling" | "lts" => record
            .release_model()
            .is_some_and(|model| model.eq_ignore_ascii_case(name)),
        _ => false,
    }
}
