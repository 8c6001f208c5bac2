//! Error types for the appdrawer engine.
//!
//! This module defines the centralized error type [`DrawerError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for drawer engine operations.
///
/// This enum consolidates all error conditions that can occur while the engine
/// runs, from settings persistence to catalog enumeration and configuration
/// issues. Collaborator failures are absorbed at the orchestrator boundary, so
/// most of these values end up in log records rather than caller-visible paths.
///
/// # Examples
///
/// ```
/// use appdrawer::domain::DrawerError;
///
/// fn validate_config() -> Result<(), DrawerError> {
///     Err(DrawerError::Config("missing data directory".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum DrawerError {
    /// Settings persistence failed.
    ///
    /// Occurs when reading from or writing to the settings backend fails.
    /// The string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog enumeration failed.
    ///
    /// Occurs when the catalog source cannot produce its list of launchable
    /// entries. The orchestrator retains the previous entries and clears the
    /// loading flag when it sees this.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when required configuration values are missing or malformed.
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for drawer engine operations.
///
/// This is a type alias for `std::result::Result<T, DrawerError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, DrawerError>;
