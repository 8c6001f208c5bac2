//! Search engine: query matching and the filtered projection.
//!
//! Matching combines case-insensitive substring checks against the display
//! name and the identifier with a deliberately weak fuzzy heuristic over
//! distinct character sets. The heuristic ignores character order,
//! multiplicity, and adjacency, and its threshold truncates (floor), never
//! rounds. Both properties are load-bearing compatibility behavior.
//!
//! All functions here are pure. The orchestrator recomputes the projection
//! synchronously when the entry list changes and, for query changes, only
//! after the debounce window has elapsed.

use crate::domain::AppEntry;
use std::collections::HashSet;

/// Fraction of a term's distinct characters that must appear in the source
/// for a fuzzy match.
const FUZZY_OVERLAP_RATIO: f64 = 0.6;

/// Returns whether an entry matches a search query.
///
/// A blank query matches everything. Otherwise the query is lower-cased and
/// split on whitespace; the entry matches iff **every** term is a substring
/// of the lower-cased display name, a substring of the lower-cased
/// identifier, or a [`fuzzy`] match against the display name.
///
/// # Examples
///
/// ```
/// use appdrawer::domain::{AppEntry, IconHandle};
/// use appdrawer::search::matches;
///
/// let entry = AppEntry {
///     id: "org.example.files".to_string(),
///     name: "Files".to_string(),
///     display_name: "Files".to_string(),
///     icon: IconHandle::default(),
///     is_system: false,
///     pinned: false,
///     launch_count: 0,
///     last_used: 0,
/// };
///
/// assert!(matches(&entry, ""));
/// assert!(matches(&entry, "FIL"));
/// assert!(matches(&entry, "example"));
/// ```
#[must_use]
pub fn matches(entry: &AppEntry, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }

    let name_lower = entry.display_name.to_lowercase();
    let id_lower = entry.id.to_lowercase();

    query
        .to_lowercase()
        .split_whitespace()
        .all(|term| name_lower.contains(term) || id_lower.contains(term) || fuzzy(&name_lower, term))
}

/// Set-overlap fuzzy match of a single term against a source string.
///
/// Terms shorter than two characters never match. Otherwise both strings are
/// reduced to their distinct lower-cased characters, and the term matches
/// when at least `floor(0.6 × |term_chars|)` of its distinct characters
/// appear in the source. Case-insensitive by construction: only the
/// lower-cased forms of the inputs matter.
#[must_use]
pub fn fuzzy(source: &str, term: &str) -> bool {
    if term.chars().count() < 2 {
        return false;
    }

    let term_chars: HashSet<char> = term.to_lowercase().chars().collect();
    let source_chars: HashSet<char> = source.to_lowercase().chars().collect();

    let matched = term_chars.intersection(&source_chars).count();

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let threshold = (term_chars.len() as f64 * FUZZY_OVERLAP_RATIO) as usize;

    matched >= threshold
}

/// Filters entries by [`matches`] and applies the deterministic result order.
///
/// The order is a stable two-key sort: launch count descending, then display
/// name ascending, case-insensitive.
#[must_use]
pub fn project(all_entries: &[AppEntry], query: &str) -> Vec<AppEntry> {
    let mut filtered: Vec<AppEntry> = all_entries
        .iter()
        .filter(|entry| matches(entry, query))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| {
        b.launch_count
            .cmp(&a.launch_count)
            .then_with(|| a.display_name.to_lowercase().cmp(&b.display_name.to_lowercase()))
    });

    filtered
}
