//! Domain layer for the appdrawer engine.
//!
//! This module contains the core domain types for the engine, independent of
//! any catalog backend or persistence concern. It follows domain-driven design
//! principles by keeping business rules isolated from external dependencies.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`entry`]: Raw and enriched catalog entry models
//!
//! # Examples
//!
//! ```
//! use appdrawer::domain::{RawEntry, Result};
//!
//! fn enumerate() -> Result<Vec<RawEntry>> {
//!     Ok(vec![RawEntry::new("org.example.files", "Files")])
//! }
//! ```

pub mod entry;
pub mod error;

pub use entry::{AppEntry, IconHandle, RawEntry};
pub use error::{DrawerError, Result};
