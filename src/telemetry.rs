//! Tracing setup helpers

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install a global fmt subscriber honoring `RUST_LOG`
///
/// Falls back to `info` when `RUST_LOG` is unset. Embedders with their own
/// subscriber should skip this and install theirs instead.
pub fn init() -> Result<()> {
    init_with_default("info")
}

/// Install a global fmt subscriber with the given default filter
pub fn init_with_default(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set logging subscriber")
}
