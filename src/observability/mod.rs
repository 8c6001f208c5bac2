//! Structured logging setup for the engine.
//!
//! The engine itself only ever emits through the `tracing` macros; this
//! module holds the optional subscriber bootstrap for embedders that do not
//! install their own.
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` option in [`Config`](crate::Config)
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup

mod init;

pub use init::init_tracing;
