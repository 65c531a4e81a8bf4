//! Tracking JSON input
//!
//! Producers hand the data layer a JSON document describing the current
//! page. This module turns raw text into that document.

use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{SharedError, SharedResult};
use crate::logging::Logger;

/// Read raw tracking text from `path`, or from standard input when `None`
///
/// # Errors
/// * `SharedError::Io` - If the file or standard input cannot be read
pub fn read_tracking_input(path: Option<&Path>) -> SharedResult<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Parse tracking JSON supplied by a producer
///
/// Blank input means no tracking data was provided and yields `Ok(None)`.
///
/// # Errors
/// * `SharedError::InvalidFormat` - If the text is not valid JSON
pub fn collect_input_json(text: &str) -> SharedResult<Option<Value>> {
    let logger = Logger::new("collect-data");
    if text.trim().is_empty() {
        logger.log("No tracking data provided.");
        return Ok(None);
    }

    match serde_json::from_str(text) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            logger.error_with(
                "Failed to parse tracking data:",
                &[Value::from(e.to_string())],
            );
            Err(SharedError::InvalidFormat {
                message: format!("tracking data is not valid JSON: {e}"),
            })
        }
    }
}
