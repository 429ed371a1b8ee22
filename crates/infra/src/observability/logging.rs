//! Structured logging setup
//!
//! `RUST_LOG` controls filtering (default `info`). JSON output is meant for
//! log shippers; the plain formatter for local runs.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Build the filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed (tests, or a second
/// call), leaving the existing one in place.
pub fn init_logging(json: bool) -> bool {
    let installed = if json {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };

    installed.is_ok()
}
