//! Filesystem path utilities for persisted engine data.
//!
//! This module decides where the engine keeps its settings file when an
//! embedder does not supply an explicit location.

use std::path::PathBuf;

/// Directory name under the platform data directory.
const APP_DIR_NAME: &str = "appdrawer";

/// File name of the JSON settings store.
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Returns the default data directory for engine storage.
///
/// Resolves to the platform-local data directory (e.g.
/// `~/.local/share/appdrawer` on Linux) and falls back to the current
/// directory when the platform directory cannot be determined.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Returns the default path of the JSON settings file.
///
/// # Examples
///
/// ```
/// use appdrawer::infrastructure::default_settings_path;
///
/// let path = default_settings_path();
/// assert!(path.ends_with("appdrawer/settings.json"));
/// ```
#[must_use]
pub fn default_settings_path() -> PathBuf {
    default_data_dir().join(SETTINGS_FILE_NAME)
}
