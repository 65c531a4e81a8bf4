//! Data layer configuration file
//!
//! Every field has a default, so a partial (or empty) YAML document is a
//! valid configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_APP_NAME, DEFAULT_APP_VERSION};
use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use crate::store::{ApplicationState, OutputFormat};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataLayerConfig {
    /// Application identity written to `myAppData`
    pub app: AppSettings,

    pub logging: LoggingConfig,

    /// Where and how the final state is written
    pub output: OutputSettings,

    /// Publish `data-updated` for every section processed
    pub notify_sections: bool,

    /// Register the built-in subscribers that log every event
    pub log_subscribers: bool,
}

/// Application identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
}

/// State output settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,

    /// Output file; standard output when unset
    pub path: Option<PathBuf>,
}

impl Default for DataLayerConfig {
    fn default() -> Self {
        Self {
            app: AppSettings::default(),
            logging: LoggingConfig::default(),
            output: OutputSettings::default(),
            notify_sections: false,
            log_subscribers: true,
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_APP_NAME.to_string(),
            version: DEFAULT_APP_VERSION.to_string(),
        }
    }
}

impl DataLayerConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// * `ConfigError::NotFound` - If the file does not exist
    /// * `ConfigError::Parse` - If the file is not valid YAML for this structure
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Save configuration as YAML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |e: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml).map_err(io_error)
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app.name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "app.name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.app.version.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "app.version".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if !self.logging.has_valid_level() {
            return Err(ConfigError::Invalid {
                field: "logging.level".to_string(),
                reason: format!("'{}' is not a valid log filter", self.logging.level),
            });
        }
        Ok(())
    }

    /// Fresh application state carrying the configured identity
    pub fn initial_state(&self) -> ApplicationState {
        ApplicationState::new(&self.app.name, &self.app.version)
    }
}
