// Configuration file loading

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::types::Config;

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("duopong");
    path.push("config.toml");
    path
}

/// Load configuration from the default location.
/// A missing file yields the defaults; nothing is written to disk.
pub fn load_config() -> anyhow::Result<Config> {
    load_config_from(&get_config_path())
}

pub fn load_config_from(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;

    Ok(config)
}
