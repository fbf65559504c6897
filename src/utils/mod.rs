pub mod build_info;

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Filter variable read before `RUST_LOG`.
pub const LOG_ENV: &str = "ZEPTO_LOG";
const DEFAULT_FILTER: &str = "zepto_core=info";

static SUBSCRIBER: Once = Once::new();

/// Picks the log filter: `ZEPTO_LOG`, then `RUST_LOG`, then `zepto_core=info`.
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs a compact stderr subscriber once; stdout stays reserved for JSON output.
pub fn init_tracing() {
    SUBSCRIBER.call_once(|| {
        let installed = fmt()
            .compact()
            .with_env_filter(log_filter())
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
        if installed.is_err() {
            tracing::debug!("a global subscriber was already installed");
        }
    });
}
