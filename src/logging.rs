//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding per-module log directives,
/// e.g. `WPFDIAG_LOG=wpfdiag::semantic=trace,wpfdiag=debug`.
pub const LOG_ENV: &str = "WPFDIAG_LOG";

static INIT: Once = Once::new();

/// Default filter when `WPFDIAG_LOG` is unset or invalid.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "wpfdiag=debug" } else { "wpfdiag=warn" }
}

/// Install the global subscriber. Logs go to stderr so stdout stays
/// reserved for reports. Idempotent.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(verbose),
            )
            .with(filter)
            .try_init();
    });
}
