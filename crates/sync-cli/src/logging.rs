use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Installs the stderr subscriber once, filtered by `SYNC_LOG`.
///
/// Format: `SYNC_LOG=badge_engine=debug,sync_cli=info`. Falls back to `warn`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("SYNC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

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
