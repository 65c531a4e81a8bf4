//! Configuration for binaries embedding the data layer
//!
//! The library itself is configured through constructor arguments; this
//! module provides the YAML file format and platform paths used by the CLI.

pub mod app_config;
pub mod paths;

pub use app_config::*;
pub use paths::{default_config_path, get_config_directory};
