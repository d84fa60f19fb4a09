//! Badges shown on catalog cards.

use smallvec::SmallVec;

use super::category::{Category, matches_category};
use crate::data::DistroRecord;

/// Categories that produce a badge, with their labels.
const CATEGORY_BADGES: [(&str, &str); 3] = [
    ("beginner", "Beginner"),
    ("server", "Server"),
    ("security", "Security"),
];

/// Release models shown as a badge (compared upper-cased).
const RELEASE_BADGES: [&str; 2] = ["LTS", "ROLLING"];

pub type Badges = SmallVec<[String; 4]>;

/// Derive the badges of a record, in display order, without duplicates.
pub fn build_badges(record: &DistroRecord) -> Badges {
    let mut badges = Badges::new();
    let mut push = |label: String| {
        if !badges.contains(&label) {
            badges.push(label);
        }
    };

    for (category, label) in CATEGORY_BADGES {
        if matches_category(record, &Category::Named(category.into())) {
            push(label.to_owned());
        }
    }

    if let Some(model) = record.release_model().map(str::to_uppercase)
        && RELEASE_BADGES.contains(&model.as_str())
    {
        push(model);
    }

    badges
}
