//! Diagnostic logging
//!
//! User-facing progress goes through the prompt UI; this subscriber only
//! carries diagnostics (copied files, spawned commands) to stderr.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

static INIT: OnceLock<()> = OnceLock::new();

/// Environment variable holding a `tracing` filter directive
pub const LOG_ENV: &str = "CREATE_STARTER_LOG";

/// Install the global subscriber. `verbose` raises the default level to debug.
pub fn init(verbose: bool) {
    INIT.get_or_init(|| {
        let default = if verbose { "debug" } else { "warn" };
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
        let subscriber = Registry::default().with(filter).with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        );
        // A subscriber may already be installed (e.g. by tests).
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
