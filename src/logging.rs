//! Diagnostic logging for the command-line tool.
//!
//! Library code only emits `tracing` events; the binary decides where they
//! go. Events are written to stderr so they never mix with report output.
//! `RUST_LOG` takes precedence over the `--verbose` default.

use std::io;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,sql_literal_inliner=debug"
    } else {
        "warn"
    }
}

/// Install the stderr subscriber. Calling it twice is a no-op.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}
