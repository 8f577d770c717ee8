//! Structured logging.
//!
//! Environment mode selects format and default level:
//! - `local`: human-readable, debug
//! - `dev`: JSON, debug
//! - `prod`: human-readable, warn
//!
//! `RUST_LOG` overrides the level, then the configured filter.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::EnvMode;

const DEBUG_FILTER: &str = "todo_gateway=debug,tower_http=debug,info";
const PROD_FILTER: &str = "warn";

/// Filter directives used when neither `RUST_LOG` nor the config set one.
pub fn default_filter(mode: EnvMode) -> &'static str {
    match mode {
        EnvMode::Local | EnvMode::Dev => DEBUG_FILTER,
        EnvMode::Prod => PROD_FILTER,
    }
}

fn build_filter(mode: EnvMode, configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if configured.is_empty() {
            EnvFilter::new(default_filter(mode))
        } else {
            EnvFilter::new(configured)
        }
    })
}

/// Install the global subscriber. Call once, from `main`.
pub fn init(mode: EnvMode, configured_filter: &str) {
    let registry = tracing_subscriber::registry().with(build_filter(mode, configured_filter));

    match mode {
        EnvMode::Dev => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        EnvMode::Local | EnvMode::Prod => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
