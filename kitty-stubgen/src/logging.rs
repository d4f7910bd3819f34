//! Diagnostic logging setup.
//!
//! Logs go to stderr. `RUST_LOG` takes precedence over the level chosen by
//! the verbosity flags.

use tracing_subscriber::{EnvFilter, fmt};

use crate::error::StubgenError;

/// Installs the global subscriber with `level` as the fallback directive.
///
/// # Errors
///
/// Returns [`StubgenError::Message`] when a subscriber is already installed.
pub fn init(level: &str) -> Result<(), StubgenError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| StubgenError::Message(format!("failed to initialise logging: {err}")))
}
