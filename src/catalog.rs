//! Catalog source abstraction.
//!
//! This module defines the [`CatalogSource`] trait that abstracts over whatever
//! system enumerates launchable entries — a desktop-file scanner, a package
//! manager query, a fixture in tests. The engine only ever talks to the catalog
//! through this trait, and only from background tasks: enumeration and launch
//! calls are blocking and must never run on the serialized state path.
//!
//! # Design Philosophy
//!
//! The trait is minimal and mirrors the three primitives the orchestrator
//! needs. Implementations own all platform detail, including how launch
//! targets are resolved and how detail views are opened.

use crate::domain::error::Result;
use crate::domain::RawEntry;

/// Abstraction over the system that enumerates and launches entries.
///
/// Implementations must be thread-safe: the orchestrator invokes them from
/// `spawn_blocking` tasks while the state loop keeps running.
///
/// # Examples
///
/// ```
/// use appdrawer::catalog::CatalogSource;
/// use appdrawer::domain::{RawEntry, Result};
///
/// struct FixedCatalog(Vec<RawEntry>);
///
/// impl CatalogSource for FixedCatalog {
///     fn list_launchable(&self) -> Result<Vec<RawEntry>> {
///         Ok(self.0.clone())
///     }
///
///     fn launch(&self, _id: &str) -> bool {
///         false
///     }
///
///     fn open_details(&self, _id: &str) {}
/// }
/// ```
pub trait CatalogSource: Send + Sync {
    /// Enumerates all launchable entries.
    ///
    /// Entry identifiers are assumed unique; the engine never deduplicates.
    ///
    /// # Errors
    ///
    /// Returns an error when enumeration fails. The orchestrator reacts by
    /// retaining the previous entries and clearing the loading flag — no error
    /// is surfaced beyond a log record.
    fn list_launchable(&self) -> Result<Vec<RawEntry>>;

    /// Launches the entry with the given identifier.
    ///
    /// Returns `true` only when a launch target was resolved and the
    /// underlying call succeeded. Failures stay inside the boolean; usage
    /// statistics are only recorded for successful launches.
    fn launch(&self, id: &str) -> bool;

    /// Opens a platform detail view for the entry.
    ///
    /// Implementations swallow their own errors; the engine treats this as
    /// best-effort fire-and-forget.
    fn open_details(&self, id: &str);
}
