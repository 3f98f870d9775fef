//! Tracing setup shared by the binaries
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to this
//! crate and `tower_http`.

use crate::config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter from `RUST_LOG` or the configured level
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(&config.level))
}

fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(format!("salesdash={level},tower_http={level}"))
        .unwrap_or_else(|_| EnvFilter::new("salesdash=info,tower_http=info"))
}

/// Install the global subscriber, pretty or JSON formatted
pub fn init_tracing(
    config: &LoggingConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let json = config.format.eq_ignore_ascii_case("json");

    let pretty_layer = (!json).then(|| tracing_subscriber::fmt::layer());
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json());

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(pretty_layer)
        .with(json_layer)
        .try_init()
}
