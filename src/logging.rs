//! Diagnostic logging to stderr.
//!
//! `EZ_LEAF_LOG` takes an `EnvFilter` directive; otherwise `-v` selects debug
//! and `-vv` trace. Normal command output stays on stdout and is unaffected.

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt};

pub const LOG_ENV_VAR: &str = "EZ_LEAF_LOG";

/// Filter directive for a `-v` count
#[must_use]
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "ez_leaf=debug",
        _ => "ez_leaf=trace",
    }
}

/// Installs the global subscriber
///
/// # Errors
/// Returns an error if a global subscriber is already installed
pub fn init_logging(verbosity: u8) -> Result<(), TryInitError> {
    let filter = std::env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init()
}
