//! Tracing subscriber setup for binaries.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "library_api=info,library_server=info,tower_http=info";

/// Filter from the directives in env var `var`, or [`DEFAULT_LOG_FILTER`] when unset or invalid.
pub fn env_filter_from(var: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install a fmt subscriber filtered by `RUST_LOG`. Load `.env` first so a
/// `RUST_LOG` set there is honored. Later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter_from("RUST_LOG"))
        .try_init();
}
