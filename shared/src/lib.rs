//! Data Layer Shared Library
//!
//! This crate contains the data holders, state store, persistence sinks and
//! utility functions that make up the data layer. It collects device, page
//! and privacy information, validates it, and publishes the aggregated state
//! to any number of subscribers.
//!
//! # Features
//!
//! - **Data Holders**: Section records seeded with defaults, with validation
//! - **State Store**: Section updates, validation error aggregation, pub/sub
//! - **Persistence**: Pluggable sinks for the full application state
//! - **Utilities**: Array, number, object and string helpers
//! - **Configuration**: YAML configuration for binaries embedding the layer
//!
//! # Usage
//!
//! ```rust
//! use datalayer_shared::models::DeviceHolder;
//! use datalayer_shared::store::{DataStore, MemorySink};
//! use serde_json::json;
//!
//! let store = DataStore::new(MemorySink::new());
//! let subscription = store.subscribe(|event| {
//!     println!("{} ({})", event.message, event.section);
//!     Ok(())
//! });
//!
//! let mut device = DeviceHolder::new();
//! device.set(&json!({ "orientation": "portrait" }));
//! store.update_validation_error_state(&device.get_data_errors());
//! store.update_device_state(&device.to_value(), true);
//!
//! assert_eq!(store.get_state().device["orientation"], "portrait");
//! subscription.unsubscribe();
//! ```

pub mod collect;
pub mod config;
pub mod data_layer;
pub mod logging;
pub mod models;
pub mod store;
pub mod utils;
pub mod validation;

// Re-export commonly used types for convenience
pub use models::{
    DataHolder, DeviceData, DeviceHolder, PageData, PageHolder, PrivacyData, PrivacyHolder,
    Record, SectionSchema,
};

// Re-export store functionality
pub use store::{
    ApplicationState, DataStore, EventScope, FileSink, MemorySink, NullSink, OutputFormat,
    PersistError, PublishReport, Section, StateSink, StoreEvent, Subscription,
};

// Re-export config functionality
pub use config::{AppSettings, DataLayerConfig, OutputSettings};

// Re-export logging functionality
pub use logging::{init_logging, LogFormat, LogTarget, Logger, LoggingConfig};

pub use collect::{collect_input_json, read_tracking_input};
pub use data_layer::DataLayerBuilder;
pub use utils::UtilError;

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types used throughout the library
pub mod error {
    use std::path::PathBuf;
    use thiserror::Error;

    use crate::store::PersistError;
    use crate::utils::UtilError;

    /// Common error type for shared library operations
    #[derive(Error, Debug)]
    pub enum SharedError {
        #[error("Serialization error: {message}")]
        Serialization { message: String },

        #[error("Invalid data format: {message}")]
        InvalidFormat { message: String },

        #[error("Configuration error: {0}")]
        Config(#[from] ConfigError),

        #[error("Persistence error: {0}")]
        Persist(#[from] PersistError),

        #[error("Utility error: {0}")]
        Util(#[from] UtilError),

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Internal error: {message}")]
        Internal { message: String },
    }

    impl From<anyhow::Error> for SharedError {
        fn from(error: anyhow::Error) -> Self {
            SharedError::Internal {
                message: error.to_string(),
            }
        }
    }

    /// Configuration file errors
    #[derive(Error, Debug)]
    pub enum ConfigError {
        #[error("Configuration file not found: {path}")]
        NotFound { path: PathBuf },

        #[error("Invalid configuration value for '{field}': {reason}")]
        Invalid { field: String, reason: String },

        #[error("Failed to parse configuration: {0}")]
        Parse(#[from] serde_yaml::Error),

        #[error("Configuration IO error at {path}: {message}")]
        Io { path: PathBuf, message: String },
    }

    /// Result type alias for shared library operations
    pub type SharedResult<T> = Result<T, SharedError>;
}

pub use error::{ConfigError, SharedError, SharedResult};

/// Library configuration and constants
pub mod constants {
    /// Application name used when none is configured
    pub const DEFAULT_APP_NAME: &str = "local-test";

    /// Application version used when none is configured
    pub const DEFAULT_APP_VERSION: &str = "1.0.12";

    /// Event published after a section update with notification enabled
    pub const DATA_UPDATED: &str = "data-updated";

    /// Event published once all sections have been processed
    pub const DATA_READY: &str = "data-ready";

    /// Record field holding a holder's own validation errors
    pub const VALIDATION_ERRORS_FIELD: &str = "validationErrors";

    /// String values treated as "not provided"
    pub const PLACEHOLDER_VALUES: &[&str] = &["unknown", "tbd"];

    /// Input key older producers use for the page type
    pub const LEGACY_PAGE_TYPE_KEY: &str = "applePage";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_library_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
        assert!(VERSION.chars().all(|c| c.is_ascii_digit() || c == '.'));
    }

    #[test]
    fn test_error_conversions() {
        let err: SharedError = UtilError::ZeroStep.into();
        assert_matches!(err, SharedError::Util(UtilError::ZeroStep));

        let err: SharedError = ConfigError::Invalid {
            field: "app.name".to_string(),
            reason: "must not be empty".to_string(),
        }
        .into();
        assert!(err.to_string().contains("app.name"));

        let err: SharedError = anyhow::anyhow!("boom").into();
        assert_matches!(err, SharedError::Internal { message } if message == "boom");
    }

    #[test]
    fn test_reexports_work_together() {
        let store = DataStore::new(NullSink);
        let holder = PageHolder::with_data(&json!({ "title": "Home" }));
        store.update_page_state(&holder.to_value(), false);
        assert_eq!(store.get_state().page["title"], json!("Home"));
        assert_eq!(store.get_state().app["appName"], json!(constants::DEFAULT_APP_NAME));
    }
}
