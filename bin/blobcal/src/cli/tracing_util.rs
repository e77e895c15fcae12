//! Tracing subscriber setup.

use anyhow::{anyhow, Result};
use tracing::Level;

/// Installs the global fmt subscriber. The level starts at `INFO` and every `-v` raises it one
/// step.
pub fn init_tracing_subscriber(verbosity_level: u8) -> Result<()> {
    let subscriber =
        tracing_subscriber::fmt().with_max_level(max_level(verbosity_level)).finish();
    tracing::subscriber::set_global_default(subscriber).map_err(|e| anyhow!(e))
}

const fn max_level(verbosity_level: u8) -> Level {
    match verbosity_level {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}
