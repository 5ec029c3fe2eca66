//! Diagnostic logging for the CLI.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `SIFT_LOG=debug`.
pub const LOG_ENV: &str = "SIFT_LOG";

/// Filter used when `SIFT_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "warn";

/// Installs a stderr subscriber so logs never mix with command output.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
