//! Storage layer for persisted preference state.
//!
//! This module provides the persistence abstraction for pin status, custom
//! display names, usage statistics, and the theme flag. Records live as small
//! text values in an abstract key-value backend; the preference store decodes
//! them into an in-memory snapshot and streams changes to subscribers.
//!
//! # Modules
//!
//! - `backend`: Settings trait abstraction for backend implementations
//! - `json`: JSON file-based backend with atomic writes
//! - `memory`: In-process backend for tests and embedding
//! - `codec`: Flat-text encodings of the persisted records
//! - `models`: Snapshot and usage record types
//! - `prefs`: The preference store itself

pub mod backend;
pub mod codec;
pub mod json;
pub mod memory;
pub mod models;
pub mod prefs;

pub use backend::SettingsBackend;
pub use json::JsonFileBackend;
pub use memory::MemoryBackend;
pub use models::{PreferenceSnapshot, UsageStat};
pub use prefs::PreferenceStore;
