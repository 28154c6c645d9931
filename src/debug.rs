// Logging setup for duopong
// Installs a tracing subscriber that writes to a file, since the TUI owns the terminal

use std::fs::OpenOptions;
use std::str::FromStr;
use std::sync::Mutex;

use anyhow::Context;
use tracing::Level;

use crate::config::LoggingConfig;

/// Initialize file logging
///
/// # Behavior
/// - If `enabled` is false: returns immediately, no file created, no subscriber
/// - Otherwise: creates/truncates the log file and installs a fmt subscriber
///   capped at the configured level
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    if !config.enabled {
        return Ok(());
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.file)
        .with_context(|| format!("failed to open log file {}", config.file.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(max_level(&config.level))
        .try_init()
        .map_err(anyhow::Error::msg)?;

    Ok(())
}

/// Parse a level name, defaulting to DEBUG for anything unrecognised
fn max_level(name: &str) -> Level {
    Level::from_str(name.trim()).unwrap_or(Level::DEBUG)
}
