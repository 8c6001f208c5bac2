//! Settings backend abstraction.
//!
//! This module defines the [`SettingsBackend`] trait that abstracts over the
//! persistence medium for preference records. The engine treats persistence as
//! an opaque key-value store of small text values; what actually holds them —
//! a JSON file, a platform preference registry, memory in tests — is an
//! implementation detail behind this trait.
//!
//! # Design Philosophy
//!
//! The trait is deliberately minimal: one getter, one setter, string values
//! only. There are no multi-key transactions; each key is persisted
//! independently, and the preference store sequences its own
//! read-modify-persist steps above this layer.

use crate::domain::error::Result;

/// Abstraction over the persistent key-value store for preference records.
///
/// Implementations must persist a `put` durably before returning: the
/// preference store publishes a mutation to subscribers only after the
/// backend write has succeeded.
///
/// # Implementations
///
/// - [`JsonFileBackend`](crate::storage::JsonFileBackend): versioned JSON file
///   with atomic writes (default)
/// - [`MemoryBackend`](crate::storage::MemoryBackend): in-process map for
///   tests and embedding
pub trait SettingsBackend: Send {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Durably stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be made durable.
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
}
