//! Commands accepted by the orchestrator.
//!
//! This module defines the [`Command`] type, the fire-and-forget messages the
//! presentation layer sends into the serialized state path. Commands never
//! return anything; their effects are observed only through the next state
//! emission.

/// A fire-and-forget instruction to the orchestrator.
///
/// Produced by the [`StateStore`](crate::app::StateStore) command methods and
/// consumed one at a time on the serialized state path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replaces the pending search query.
    ///
    /// The value is applied to the projection only after the debounce window
    /// elapses without a newer value superseding it.
    SetQuery(String),

    /// Clears the search query (equivalent to setting it to the empty
    /// string; goes through the same debounce path).
    ClearQuery,

    /// Launches an entry via the catalog source.
    ///
    /// Runs off the state path. On success only, the usage increment is fired
    /// asynchronously — not awaited, result discarded.
    Launch(String),

    /// Pins or unpins an entry based on its current pinned flag.
    TogglePin(String),

    /// Sets or clears the custom display name for an entry.
    ///
    /// A blank name clears the override, reverting to the canonical name.
    Rename {
        /// Identifier of the entry to rename.
        id: String,
        /// New display name, or blank to revert.
        name: String,
    },

    /// Re-runs the full startup sequence: loading flag, fresh catalog
    /// enumeration, merge, projection.
    Refresh,

    /// Flips and persists the dark-theme flag.
    ToggleTheme,

    /// Opens the platform detail view for an entry via the catalog source.
    ///
    /// Runs off the state path; errors are swallowed by the catalog.
    OpenDetails(String),
}
