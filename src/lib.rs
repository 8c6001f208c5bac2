//! Appdrawer: a reactive merge/search engine for a catalog of launchable entries.
//!
//! Appdrawer maintains a live, search-filterable view over a catalog of
//! discrete launchable items, enriched with user-controlled metadata:
//! - Pin status, custom display names, and usage statistics, persisted across runs
//! - A debounced fuzzy/substring search pipeline with deterministic ordering
//! - Wholesale recomputation on every catalog or preference change
//! - A single serialized state path publishing immutable view snapshots
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Presentation Layer (embedder)                      │  ← Not in this crate
//! └─────────────────────────────────────────────────────┘
//!            │ commands              ▲ watch<ViewState>
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Serialized state path
//! │  - Command handling                                 │  ← Debounced query slot
//! │  - Merge/search recomputes                          │  ← Catalog sequencing
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Merge/Search  │   │ Storage Layer │   │ Catalog       │
//! │ (merge,       │   │ (storage/)    │   │ (catalog)     │
//! │  search)      │   │ - KV backend  │   │ - Enumeration │
//! │ - Pure fns    │   │ - Pref store  │   │ - Launching   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Entry models (domain/entry)                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Orchestrator, commands, and the canonical view state
//! - [`catalog`]: Catalog source abstraction (enumerate/launch/details)
//! - [`domain`]: Core domain types (entries, errors)
//! - [`merge`]: Pure merge engine combining raw entries with preferences
//! - [`search`]: Pure query matching and the filtered projection
//! - [`storage`]: Key-value persistence and the streamed preference store
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`observability`]: Tracing subscriber bootstrap (optional)
//!
//! # Reactive Flow
//!
//! 1. **Startup**: publish an empty loading state, enumerate the catalog on a
//!    blocking task.
//! 2. **Enumeration complete**: merge raw entries with the current preference
//!    snapshot, project with the current query, publish with loading cleared.
//! 3. **Preference change**: every emission of the pinned/name/usage streams
//!    triggers a remerge against the retained raw entries, then a projection,
//!    then a publish.
//! 4. **Query change**: collapsed by a 300 ms single-slot debounce; only the
//!    newest value is ever applied and published.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use appdrawer::{Config, StateStore};
//! use appdrawer::catalog::CatalogSource;
//! use appdrawer::domain::{RawEntry, Result};
//! use appdrawer::storage::{JsonFileBackend, PreferenceStore};
//!
//! struct HostCatalog;
//!
//! impl CatalogSource for HostCatalog {
//!     fn list_launchable(&self) -> Result<Vec<RawEntry>> {
//!         Ok(vec![RawEntry::new("org.example.files", "Files")])
//!     }
//!     fn launch(&self, _id: &str) -> bool { true }
//!     fn open_details(&self, _id: &str) {}
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! let config = Config::default();
//! appdrawer::observability::init_tracing(&config);
//!
//! let backend = JsonFileBackend::new(config.settings_path())?;
//! let prefs = Arc::new(PreferenceStore::new(Box::new(backend))?);
//! let store = StateStore::spawn(Arc::new(HostCatalog), prefs, &config);
//!
//! let mut states = store.subscribe();
//! store.set_query("fil");
//! while states.changed().await.is_ok() {
//!     let state = states.borrow().clone();
//!     println!("{} of {} entries", state.filtered_entries.len(), state.all_entries.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Key Design Decisions
//!
//! ## Wholesale Derivation
//!
//! Enriched entries are recomputed from scratch on every relevant change
//! rather than patched in place. Display name and pin status are pure
//! functions of the raw entry and the preference snapshot, which keeps the
//! merge trivially correct under any interleaving of changes.
//!
//! ## Single-Slot Debounce
//!
//! Rapid query updates collapse into one applied value: a pending slot plus a
//! rearming deadline. Superseded values are discarded outright — there is no
//! queue and no cleanup, so the projection for an intermediate query is never
//! published.
//!
//! ## Durability Before Visibility
//!
//! Every preference mutation persists to the settings backend before the new
//! value reaches any stream subscriber, so a view derived from a published
//! preference is always backed by storage.

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod merge;
pub mod observability;
pub mod search;
pub mod storage;

pub use app::{Command, StateStore, ViewState};
pub use catalog::CatalogSource;
pub use domain::{AppEntry, DrawerError, IconHandle, RawEntry, Result};
pub use storage::{JsonFileBackend, MemoryBackend, PreferenceSnapshot, PreferenceStore, SettingsBackend, UsageStat};

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Engine configuration.
///
/// All fields have defaults, so `Config::default()` is a working setup.
/// Embedders can also load a TOML file:
///
/// ```toml
/// # ~/.config/appdrawer/config.toml
/// debounce_ms = 300
/// data_dir = "/home/user/.local/share/appdrawer"
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Quiet period of the query debounce, in milliseconds.
    ///
    /// Every new query value rearms the timer; only the value present when it
    /// fires is applied. Default: 300.
    pub debounce_ms: u64,

    /// Directory holding the persisted settings file.
    ///
    /// Defaults to the platform data directory (see
    /// [`infrastructure::default_data_dir`]).
    pub data_dir: Option<PathBuf>,

    /// Tracing level for [`observability::init_tracing`].
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            data_dir: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use appdrawer::Config;
    ///
    /// let config = Config::from_file("/etc/appdrawer/config.toml")?;
    /// # Ok::<(), appdrawer::DrawerError>(())
    /// ```
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)?;
        toml::from_str(&contents)
            .map_err(|e| DrawerError::Config(format!("invalid config file {}: {e}", path.display())))
    }

    /// Returns the debounce quiet period as a [`Duration`].
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Returns the path of the JSON settings file under the configured (or
    /// default) data directory.
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.as_ref().map_or_else(
            infrastructure::default_settings_path,
            |dir| dir.join("settings.json"),
        )
    }
}
