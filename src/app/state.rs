//! Canonical view state owned by the orchestrator.
//!
//! [`ViewState`] is the single derived projection the presentation layer
//! consumes. It is created empty (and loading) at startup, replaced wholesale
//! on every recompute, and published through a `watch` channel — subscribers
//! never observe a partially updated state.

use crate::domain::AppEntry;

/// Snapshot of everything the presentation layer needs to render the drawer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// All enriched entries, in catalog order.
    pub all_entries: Vec<AppEntry>,

    /// Entries matching the applied query, in the deterministic result order
    /// (launch count descending, display name ascending, case-insensitive).
    pub filtered_entries: Vec<AppEntry>,

    /// Pinned entries, launch count descending, stable on ties.
    pub pinned_entries: Vec<AppEntry>,

    /// The query whose projection `filtered_entries` currently reflects.
    ///
    /// Updated when a debounced query value is applied, not on every
    /// keystroke — intermediate values superseded inside the debounce window
    /// never appear here.
    pub query: String,

    /// Whether a catalog enumeration is in flight.
    pub loading: bool,

    /// The persisted dark-theme flag, mirrored here so a theme toggle is
    /// observable through the state stream like every other command effect.
    pub dark_theme: bool,
}

impl ViewState {
    /// Creates the startup state: empty lists, blank query, loading set.
    #[must_use]
    pub fn initial(dark_theme: bool) -> Self {
        Self {
            loading: true,
            dark_theme,
            ..Self::default()
        }
    }
}
