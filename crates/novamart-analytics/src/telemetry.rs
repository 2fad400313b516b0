//! Tracing bootstrap for the host process.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::DashboardConfig;

/// Install a JSON tracing subscriber. `RUST_LOG` wins over the configured
/// level. Returns `false` if a global subscriber was already set.
pub fn init_tracing(config: &DashboardConfig) -> bool {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
        .is_ok()
}
