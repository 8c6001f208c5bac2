//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber for embedders that want the
//! engine's structured log output without wiring their own pipeline.

use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber with an env-filtered fmt layer.
///
/// # Trace Level Resolution
///
/// Level is determined by:
/// 1. The `RUST_LOG` environment variable (highest priority)
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
///
/// # Initialization Behavior
///
/// Idempotent: safe to call multiple times, and a no-op when the embedder has
/// already installed a global subscriber (observability is optional).
///
/// # Examples
///
/// ```
/// use appdrawer::observability::init_tracing;
/// use appdrawer::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer());

    let _ = subscriber.try_init();
}
