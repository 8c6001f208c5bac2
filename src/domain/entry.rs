//! Catalog entry domain models.
//!
//! This module defines the two entry representations the engine works with:
//! [`RawEntry`], produced by the catalog source, and [`AppEntry`], the enriched
//! form that combines a raw entry with preference-derived display, pin, and
//! usage fields. Enriched entries are derived data — they are recomputed
//! wholesale by the merge engine on every relevant change and never patched
//! in place.

/// Opaque reference to an entry's icon.
///
/// The engine never interprets icon data; it carries this token through so a
/// presentation layer can resolve it against whatever rendering system it
/// uses. The inner string is typically a path, a theme icon name, or a cache
/// key — the catalog source decides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconHandle(pub String);

impl IconHandle {
    /// Creates an icon handle from any string-like token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

/// A launchable entry as enumerated by the catalog source.
///
/// Raw entries are immutable inputs to the merge engine. Identifier uniqueness
/// is assumed from the catalog source and never enforced here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Unique identifier within the catalog (e.g. a package or desktop-file id).
    pub id: String,

    /// Canonical display name as reported by the catalog.
    pub name: String,

    /// Opaque icon token for the presentation layer.
    pub icon: IconHandle,

    /// Whether the catalog classifies this entry as a system-provided one.
    pub is_system: bool,
}

impl RawEntry {
    /// Creates a raw entry with an empty icon handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use appdrawer::domain::RawEntry;
    ///
    /// let entry = RawEntry::new("org.example.editor", "Editor");
    /// assert_eq!(entry.id, "org.example.editor");
    /// assert!(!entry.is_system);
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: IconHandle::default(),
            is_system: false,
        }
    }
}

/// A raw entry enriched with preference-derived fields.
///
/// `display_name` and `pinned` are pure functions of the raw entry and the
/// preference snapshot at merge time; `launch_count` and `last_used` come from
/// the usage map (defaulting to zero when absent). The merge engine rebuilds
/// the full list on each change, so instances are cheap, short-lived clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEntry {
    /// Unique identifier carried over from the raw entry.
    pub id: String,

    /// Canonical name carried over from the raw entry.
    pub name: String,

    /// Name to display: the custom override when one exists, else the
    /// canonical name.
    pub display_name: String,

    /// Opaque icon token carried over from the raw entry.
    pub icon: IconHandle,

    /// Whether the entry is system-provided.
    pub is_system: bool,

    /// Whether the entry is in the pinned set.
    pub pinned: bool,

    /// Number of recorded launches.
    pub launch_count: u32,

    /// Unix-millisecond timestamp of the most recent launch, 0 if never.
    pub last_used: i64,
}
