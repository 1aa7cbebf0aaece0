//! Structured logging setup.
//!
//! Logs go to stderr so they never mix with command output on stdout.
//! `RUST_LOG` controls the filter unless `--verbose` forces `debug`.

use crate::constants::{DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON};
use crate::errors::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

/// Builds the filter for the requested verbosity.
pub fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    }
}

/// Installs the global subscriber in text or JSON format.
///
/// # Errors
///
/// Returns `AppError::Config` if a global subscriber is already installed.
pub fn init_tracing(format: &str, verbose: bool) -> AppResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr);

    let result = if format == LOG_FORMAT_JSON {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| AppError::Config(format!("Failed to initialize logging: {}", e)))
}
