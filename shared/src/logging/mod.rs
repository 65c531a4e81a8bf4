//! Logging infrastructure for the data layer
//!
//! Components log through a name-prefixed [`Logger`]; binaries install a
//! `tracing-subscriber` once at startup with [`init_logging`].

pub mod logger;

pub use logger::Logger;

use serde::{Deserialize, Serialize};
use std::sync::Once;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Global initialization flag to ensure logging is only set up once
static INIT: Once = Once::new();

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact format: LEVEL message
    #[default]
    Compact,
    /// Full format: timestamp LEVEL target: message
    Full,
    /// JSON format for structured logging
    Json,
}

/// Log output target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    #[default]
    Stderr,
    Stdout,
}

/// Logging configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `datalayer_shared=debug`
    pub level: String,
    pub format: LogFormat,
    pub target: LogTarget,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            target: LogTarget::Stderr,
        }
    }
}

impl LoggingConfig {
    /// Whether `level` parses as a filter directive
    pub fn has_valid_level(&self) -> bool {
        EnvFilter::try_new(&self.level).is_ok()
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `config.level`. Only the first call has
/// any effect; returns whether this call installed the subscriber.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let mut installed = false;
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))
            .unwrap_or_else(|_| EnvFilter::new("info"));
        let writer = match config.target {
            LogTarget::Stderr => BoxMakeWriter::new(std::io::stderr),
            LogTarget::Stdout => BoxMakeWriter::new(std::io::stdout),
        };

        let result = match config.format {
            LogFormat::Compact => tracing_subscriber::fmt()
                .compact()
                .with_target(false)
                .with_env_filter(filter)
                .with_writer(writer)
                .try_init(),
            LogFormat::Full => tracing_subscriber::fmt()
                .with_target(true)
                .with_env_filter(filter)
                .with_writer(writer)
                .try_init(),
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(writer)
                .try_init(),
        };
        installed = result.is_ok();
    });
    installed
}

/// Check if logging has been initialized
pub fn is_logging_initialized() -> bool {
    INIT.is_completed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.target, LogTarget::Stderr);
        assert_eq!(config.format, LogFormat::Compact);
        assert!(config.has_valid_level());
    }

    #[test]
    fn test_level_validation() {
        let mut config = LoggingConfig::default();
        config.level = "datalayer_shared=debug,warn".to_string();
        assert!(config.has_valid_level());
        config.level = "datalayer=verbose".to_string();
        assert!(!config.has_valid_level());
    }

    #[test]
    fn test_init_runs_once() {
        init_logging(&LoggingConfig::default());
        assert!(is_logging_initialized());
        assert!(!init_logging(&LoggingConfig::default()));
    }

    #[test]
    fn test_config_from_yaml() {
        let config: LoggingConfig = serde_yaml::from_str("format: json\ntarget: stdout\n").unwrap();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.target, LogTarget::Stdout);
        assert_eq!(config.level, "info");
    }
}
