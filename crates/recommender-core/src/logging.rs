//! Diagnostics for hosts that do not install their own subscriber
//!
//! The engine logs enabled recommendation sources at `info`, skipped
//! property lines at `warn` and failing providers at `error`.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset: quiet dependencies, engine at info.
pub const DEFAULT_FILTER: &str = "warn,recommender_core=info";

/// Install a compact subscriber for recommender diagnostics.
///
/// Returns an error if `RUST_LOG` holds an invalid directive or the host
/// already set a global subscriber.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => EnvFilter::try_new(directives)?,
        Err(_) => EnvFilter::try_new(DEFAULT_FILTER)?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_thread_ids(true).compact())
        .try_init()?;

    Ok(())
}
