//! Merge engine: raw catalog entries + preference snapshot → enriched entries.
//!
//! Both functions here are pure: no clocks, no I/O, no hidden state. The
//! orchestrator re-invokes [`merge`] on initial catalog load completion and on
//! every emission of any preference stream, always against the full raw list —
//! enriched entries are rebuilt wholesale, never patched incrementally.

use crate::domain::{AppEntry, RawEntry};
use crate::storage::models::PreferenceSnapshot;

/// Combines raw entries with a preference snapshot into enriched entries.
///
/// For each raw entry, in input order:
/// - `display_name` is the custom override when present, else the canonical
///   name,
/// - `pinned` is membership in the pinned set,
/// - `launch_count`/`last_used` come from the usage map, defaulting to (0, 0).
///
/// # Examples
///
/// ```
/// use appdrawer::domain::RawEntry;
/// use appdrawer::merge::merge;
/// use appdrawer::storage::PreferenceSnapshot;
///
/// let raw = vec![RawEntry::new("org.example.files", "Files")];
/// let enriched = merge(&raw, &PreferenceSnapshot::default());
/// assert_eq!(enriched[0].display_name, "Files");
/// assert!(!enriched[0].pinned);
/// ```
#[must_use]
pub fn merge(raw_entries: &[RawEntry], prefs: &PreferenceSnapshot) -> Vec<AppEntry> {
    raw_entries
        .iter()
        .map(|raw| {
            let stat = prefs.usage.get(&raw.id).copied().unwrap_or_default();
            AppEntry {
                id: raw.id.clone(),
                name: raw.name.clone(),
                display_name: prefs
                    .custom_names
                    .get(&raw.id)
                    .cloned()
                    .unwrap_or_else(|| raw.name.clone()),
                icon: raw.icon.clone(),
                is_system: raw.is_system,
                pinned: prefs.pinned.contains(&raw.id),
                launch_count: stat.count,
                last_used: stat.last_used,
            }
        })
        .collect()
}

/// Extracts the pinned sublist, ordered by launch count descending.
///
/// The sort is stable: entries with equal launch counts keep the relative
/// order they had in `enriched`.
#[must_use]
pub fn pinned_of(enriched: &[AppEntry]) -> Vec<AppEntry> {
    let mut pinned: Vec<AppEntry> = enriched.iter().filter(|e| e.pinned).cloned().collect();
    pinned.sort_by_key(|e| std::cmp::Reverse(e.launch_count));
    pinned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::models::UsageStat;

    fn raw(id: &str, name: &str) -> RawEntry {
        RawEntry::new(id, name)
    }

    #[test]
    fn display_name_prefers_custom_override() {
        let mut prefs = PreferenceSnapshot::default();
        prefs
            .custom_names
            .insert("org.example.files".to_string(), "My Files".to_string());

        let enriched = merge(&[raw("org.example.files", "Files")], &prefs);
        assert_eq!(enriched[0].display_name, "My Files");
        assert_eq!(enriched[0].name, "Files");
    }

    #[test]
    fn display_name_falls_back_to_canonical() {
        let enriched = merge(
            &[raw("org.example.files", "Files")],
            &PreferenceSnapshot::default(),
        );
        assert_eq!(enriched[0].display_name, "Files");
    }

    #[test]
    fn pinned_flag_reflects_membership() {
        let mut prefs = PreferenceSnapshot::default();
        prefs.pinned.insert("org.example.mail".to_string());

        let enriched = merge(
            &[raw("org.example.files", "Files"), raw("org.example.mail", "Mail")],
            &prefs,
        );
        assert!(!enriched[0].pinned);
        assert!(enriched[1].pinned);
    }

    #[test]
    fn absent_usage_defaults_to_zero() {
        let enriched = merge(
            &[raw("org.example.files", "Files")],
            &PreferenceSnapshot::default(),
        );
        assert_eq!(enriched[0].launch_count, 0);
        assert_eq!(enriched[0].last_used, 0);
    }

    #[test]
    fn merge_preserves_input_order() {
        let raws = vec![raw("b", "B"), raw("a", "A"), raw("c", "C")];
        let enriched = merge(&raws, &PreferenceSnapshot::default());
        let ids: Vec<&str> = enriched.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn pinned_of_sorts_by_launch_count_descending() {
        let mut prefs = PreferenceSnapshot::default();
        for id in ["a", "b", "c"] {
            prefs.pinned.insert(id.to_string());
        }
        prefs.usage.insert("a".to_string(), UsageStat::new(1, 0));
        prefs.usage.insert("b".to_string(), UsageStat::new(9, 0));

        let enriched = merge(&[raw("a", "A"), raw("b", "B"), raw("c", "C")], &prefs);
        let pinned = pinned_of(&enriched);
        let ids: Vec<&str> = pinned.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn pinned_of_keeps_prior_order_on_ties() {
        let mut prefs = PreferenceSnapshot::default();
        for id in ["x", "y", "z"] {
            prefs.pinned.insert(id.to_string());
            prefs.usage.insert(id.to_string(), UsageStat::new(3, 0));
        }

        let enriched = merge(&[raw("x", "X"), raw("y", "Y"), raw("z", "Z")], &prefs);
        let pinned = pinned_of(&enriched);
        let ids: Vec<&str> = pinned.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["x", "y", "z"]);
    }

    #[test]
    fn unpinned_entries_are_excluded() {
        let mut prefs = PreferenceSnapshot::default();
        prefs.pinned.insert("a".to_string());

        let enriched = merge(&[raw("a", "A"), raw("b", "B")], &prefs);
        let pinned = pinned_of(&enriched);
        assert_eq!(pinned.len(), 1);
        assert_eq!(pinned[0].id, "a");
    }
}
