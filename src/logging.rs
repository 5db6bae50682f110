//! Logging configuration for sloany.
//!
//! Logs go to stderr so they never interleave with the query table written
//! to stdout.

use tracing_subscriber::EnvFilter;

/// Initializes stderr logging.
///
/// The default level is `info`; `RUST_LOG` overrides it.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
