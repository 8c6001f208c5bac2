//! Preference state models for the persistence layer.
//!
//! This module defines the in-memory representation of everything the
//! preference store owns. The snapshot is the single source of truth the merge
//! engine reads; persisted text representations live in [`crate::storage::codec`].

use std::collections::{HashMap, HashSet};

/// Usage statistics for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UsageStat {
    /// Number of recorded launches.
    pub count: u32,

    /// Unix-millisecond timestamp of the most recent launch, 0 if never.
    pub last_used: i64,
}

impl UsageStat {
    /// Creates a usage stat.
    #[must_use]
    pub const fn new(count: u32, last_used: i64) -> Self {
        Self { count, last_used }
    }
}

/// Point-in-time copy of all preference state the merge engine consumes.
///
/// Owned by the preference store and mutated only through its operations.
/// The orchestrator reads a clone of this through the store's snapshot
/// accessor rather than relying on stream replay, so a merge always sees one
/// coherent view of all three maps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceSnapshot {
    /// Identifiers of pinned entries.
    pub pinned: HashSet<String>,

    /// Custom display-name overrides; an absent key means no override.
    pub custom_names: HashMap<String, String>,

    /// Per-entry usage statistics; an absent key means never launched.
    pub usage: HashMap<String, UsageStat>,
}
