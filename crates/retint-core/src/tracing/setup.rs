//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Default filter when `RETINT_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "retint=info,retint_core=info";

/// Filter used by `--quiet`: only warnings and errors reach stderr.
pub const QUIET_FILTER: &str = "retint=warn,retint_core=warn";

/// Initialize the retint tracing/logging system.
///
/// Reads the `RETINT_LOG` environment variable for per-module log levels.
/// Format: `RETINT_LOG=retint_core::rewriter=debug,retint_core::scanner=warn`
///
/// Falls back to [`DEFAULT_FILTER`] if `RETINT_LOG` is not set or is invalid.
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    init_tracing_with_default(DEFAULT_FILTER);
}

/// Same as [`init_tracing`], with a caller-chosen fallback filter.
pub fn init_tracing_with_default(default_filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("RETINT_LOG")
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        // try_init: a host application may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init();
    });
}
