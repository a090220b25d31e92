//! Logging setup
//!
//! Structured logging via `tracing`, configured from
//! [`LoggingConfig`](crate::config::LoggingConfig): an env-filter
//! seeded from the configured level (overridable through `RUST_LOG`)
//! and either a pretty or a JSON formatter.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Install the global tracing subscriber.
///
/// Safe to call more than once: if a subscriber is already installed
/// (earlier call, or a test harness sharing the process) the call is a
/// no-op. `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("streampanel={}", config.level).into());

    let result = if config.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("subscriber already installed, keeping it");
    }
}
