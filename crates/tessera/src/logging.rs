//! Logging setup for binaries built on Tessera.
//!
//! Library code only emits `tracing` events; installing a subscriber is
//! the application's call. This module is the one-liner for it.

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::TesseraError;

/// Filter used when neither `LogConfig::filter` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "info";

/// Log line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single line with timestamp and level.
    #[default]
    Full,
    /// Single line, abbreviated.
    Compact,
    /// Multi-line, for reading in a terminal.
    Pretty,
}

/// Logging options.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Output layout.
    pub format: LogFormat,
    /// Explicit filter directive (e.g. `"info,tessera_session=debug"`).
    /// `None` reads `RUST_LOG`, then falls back to [`DEFAULT_FILTER`].
    pub filter: Option<String>,
    /// Whether to print the event's target module.
    pub include_target: bool,
}

/// Installs a global `tracing` subscriber.
///
/// # Errors
/// Returns [`TesseraError::Logging`] if the filter doesn't parse or a
/// global subscriber is already installed.
pub fn init_logging(config: LogConfig) -> Result<(), TesseraError> {
    let filter = match &config.filter {
        Some(directives) => EnvFilter::try_new(directives)
            .map_err(|e| TesseraError::Logging(e.to_string()))?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let layer = match config.format {
        LogFormat::Full => fmt::layer()
            .with_target(config.include_target)
            .with_filter(filter)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(config.include_target)
            .with_filter(filter)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(config.include_target)
            .with_filter(filter)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| TesseraError::Logging(e.to_string()))
}
