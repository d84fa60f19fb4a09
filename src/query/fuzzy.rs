//! Fuzzy subsequence search.

use crate::data::DistroRecord;

/// Points per query character found in the text.
const MATCH_WEIGHT: f64 = 2.0;
/// Points per space skipped over in the text.
const SPACE_WEIGHT: f64 = 0.1;

/// Score `query` as a case-insensitive subsequence of `text`.
///
/// Returns 0 unless every query character appears in `text` in order.
/// Only `score > 0` is used for matching today; the weights are kept for ranking.
pub fn fuzzy_score(query: &str, text: &str) -> f64 {
    let query: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if query.is_empty() {
        return 0.0;
    }

    let mut pos = 0;
    let mut score = 0.0;
    for c in text.chars().flat_map(char::to_lowercase) {
        if pos < query.len() && c == query[pos] {
            score += MATCH_WEIGHT;
            pos += 1;
        } else if c == ' ' {
            score += SPACE_WEIGHT;
        }
    }

    if pos == query.len() { score } else { 0.0 }
}

/// Check whether a record matches the search text.
///
/// Searches name, category, package manager, release model and pros.
/// A blank query matches every record.
pub fn matches_query(record: &DistroRecord, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }

    let pros = record.pros.join(" ");
    let fields = [
        Some(record.name.as_str()),
        record.category.as_deref(),
        record.package_manager.as_deref(),
        record.release_model.as_deref(),
        Some(pros.as_str()),
    ];

    fields
        .into_iter()
        .flatten()
        .any(|field| fuzzy_score(query, field) > 0.0)
}
