//! Logging setup for the binary.
//!
//! Logs go to stderr so the calculator display on stdout stays clean.
//! `RUST_LOG` takes precedence over the configured level:
//! ```bash
//! RUST_LOG=libcalc_core=debug libcalc eval "50+25="
//! ```

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize the global subscriber with `level` as the default filter.
///
/// Safe to call multiple times (only the first call takes effect). An
/// unparseable `level` falls back to "warn".
pub fn init(level: &str) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
