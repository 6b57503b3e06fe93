//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging to stderr so stdout carries only the report.
///
/// Reads the `RAINFALL_LOG` environment variable, e.g.
/// `RAINFALL_LOG=rainfall_forecasts=debug`. Falls back to
/// `rainfall_forecasts=warn` when it is unset or invalid.
///
/// Calling it more than once is harmless.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("RAINFALL_LOG")
            .unwrap_or_else(|_| EnvFilter::new("rainfall_forecasts=warn"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
