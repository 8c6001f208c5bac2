//! JSON file-based settings backend.
//!
//! This module provides a simple, human-readable backend implementation using
//! JSON serialization. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - loads entire file into memory once
//! - **Write**: O(n) - serializes and writes all keys on every put
//! - **Best for**: a handful of small text records, infrequent writes

use crate::domain::error::{DrawerError, Result};
use crate::storage::backend::SettingsBackend;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// JSON settings container format.
///
/// This is the top-level structure serialized to disk. Wraps the key-value
/// map in a single versioned object for future extensibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SettingsData {
    /// Version of the settings format for future migrations.
    version: u32,

    /// All stored values, keyed by record name.
    #[serde(default)]
    values: BTreeMap<String, String>,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            version: 1,
            values: BTreeMap::new(),
        }
    }
}

/// JSON file settings backend.
///
/// Stores preference records in a human-readable JSON file with atomic
/// writes. The entire dataset is kept in memory and persisted on every
/// mutation.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. The preference store serializes access
/// to it behind its own lock.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "values": {
///     "pinned_apps": "org.example.files,org.example.mail",
///     "dark_theme": "true"
///   }
/// }
/// ```
pub struct JsonFileBackend {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory data cache, loaded on creation.
    data: SettingsData,
}

impl JsonFileBackend {
    /// Creates or opens a JSON settings backend.
    ///
    /// If the file exists and parses, loads existing data. A file that exists
    /// but does not parse is treated as empty so startup always proceeds; the
    /// corrupt content is replaced on the next write. Parent directories are
    /// created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use appdrawer::storage::JsonFileBackend;
    /// use std::path::PathBuf;
    ///
    /// let backend = JsonFileBackend::new(PathBuf::from("/tmp/settings.json"))?;
    /// # Ok::<(), appdrawer::domain::DrawerError>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON settings backend");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)
        } else {
            tracing::debug!("initializing new empty settings file");
            SettingsData::default()
        };

        tracing::debug!(key_count = data.values.len(), "settings backend initialized");

        Ok(Self { file_path, data })
    }

    /// Loads settings data from a JSON file, falling back to empty on
    /// unreadable or unparsable content.
    fn load_from_file(path: &PathBuf) -> SettingsData {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "failed to read settings file, starting empty");
                return SettingsData::default();
            }
        };

        match serde_json::from_str::<SettingsData>(&contents) {
            Ok(data) => {
                tracing::debug!(version = data.version, keys = data.values.len(), "loaded settings data");
                data
            }
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "settings file is not valid JSON, starting empty");
                SettingsData::default()
            }
        }
    }

    /// Saves settings data to disk using atomic write.
    ///
    /// Writes to a temporary file first, then atomically renames it to the
    /// target path. This ensures the file is never left in a corrupt state,
    /// even if the process crashes mid-write.
    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| DrawerError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::trace!(path = ?self.file_path, "settings saved");
        Ok(())
    }
}

impl SettingsBackend for JsonFileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.values.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_put", key = %key).entered();

        self.data.values.insert(key.to_string(), value.to_string());
        self.save_to_file()
    }
}
