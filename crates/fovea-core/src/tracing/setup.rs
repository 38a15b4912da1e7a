//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Fovea tracing/logging system.
///
/// Reads the `FOVEA_LOG` environment variable for per-subsystem log levels.
/// Format: `FOVEA_LOG=fovea_engine=debug,fovea_storage=warn`
///
/// Falls back to `fovea=info` if `FOVEA_LOG` is not set or is invalid.
///
/// This function is idempotent; calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("FOVEA_LOG").unwrap_or_else(|_| EnvFilter::new("fovea=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
