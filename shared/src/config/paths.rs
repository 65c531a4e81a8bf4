//! Platform path helpers for the data layer configuration
//!
//! This follows platform conventions:
//! - Linux: ~/.config/datalayer
//! - Windows: %APPDATA%/datalayer
//! - macOS: ~/Library/Application Support/datalayer

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Name of the directory created under the platform config directory
pub const CONFIG_DIR_NAME: &str = "datalayer";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// Get the user's configuration directory for the data layer
pub fn get_config_directory() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|p| p.join(".config")))
        .context("Could not determine config directory")?
        .join(CONFIG_DIR_NAME);

    Ok(config_dir)
}

/// `<config_dir>/datalayer/config.yml`
pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_config_directory()?.join(CONFIG_FILE_NAME))
}
