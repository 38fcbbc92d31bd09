//! Ironsight binary.
//!
//! Usage: `ironsight [CONFIG]`. Without an argument the config path comes
//! from `IRONSIGHT_CONFIG`, then `ironsight.toml` in the working directory.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::Result;
use ironsight_engine::EngineConfig;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("ironsight=info".parse()?))
        .init();

    info!("Ironsight starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = match std::env::args_os().nth(1) {
        Some(path) => EngineConfig::load_from(path),
        None => EngineConfig::load(),
    };
    config.validate();

    let summary = ironsight_engine::run(&config)?;

    info!(
        "Shots: {}, hits: {}, kills: {}, respawns: {}",
        summary.stats.shots, summary.stats.hits, summary.stats.kills, summary.stats.respawns
    );
    info!("Ironsight shutdown complete");
    Ok(())
}
