//! Tracing subscriber initialization.

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Installs a formatted tracing subscriber as the global default.
///
/// `RUST_LOG` takes precedence over the configured level. Returns `false`
/// when a global subscriber was already installed, in which case the
/// existing one is kept.
#[must_use = "reports whether this call installed the subscriber"]
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(level = %config.level, "tracing subscriber installed");
    }
    installed
}
