//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "GALAKSIO_LOG";

/// Filter used when `GALAKSIO_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "galaksio=info";

/// Initialize the Galaksio tracing/logging system.
///
/// Reads `GALAKSIO_LOG` for per-crate log levels.
/// Format: `GALAKSIO_LOG=galaksio_pairing=debug,galaksio_galaxy=info`
///
/// Falls back to `galaksio=info` if `GALAKSIO_LOG` is not set or is invalid.
/// Calling this more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // A host application may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .with(filter)
            .try_init();
    });
}
