//! In-memory settings backend.
//!
//! Holds preference records in a plain map with no durability. Intended for
//! tests and for embedders that manage persistence elsewhere; everything the
//! preference store does against a [`JsonFileBackend`](crate::storage::JsonFileBackend)
//! works identically against this.

use crate::domain::error::Result;
use crate::storage::backend::SettingsBackend;
use std::collections::HashMap;

/// Settings backend that stores all values in process memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: HashMap<String, String>,
}

impl MemoryBackend {
    /// Creates an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-seeded with the given key-value pairs.
    ///
    /// Useful for tests that start from previously "persisted" state.
    #[must_use]
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl SettingsBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
