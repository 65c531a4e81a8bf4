//! Privacy section: consent notice state.

use serde::{Deserialize, Serialize};

use super::{DataHolder, SectionSchema};

/// Typed view of the privacy section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivacyData {
    pub notice_behavior: String,
    pub notice_gdpr_prefs: String,
    pub notice_preferences: String,
    #[serde(rename = "validationErrors", default)]
    pub validation_errors: Vec<String>,
}

impl Default for PrivacyData {
    fn default() -> Self {
        Self {
            notice_behavior: "tbd".to_string(),
            notice_gdpr_prefs: "tbd".to_string(),
            notice_preferences: "tbd".to_string(),
            validation_errors: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrivacySchema;

impl SectionSchema for PrivacySchema {
    const LOGGER_NAME: &'static str = "privacy-data";
    const REQUIRED_STRINGS: &'static [&'static str] =
        &["notice_behavior", "notice_gdpr_prefs", "notice_preferences"];
    type Data = PrivacyData;
}

pub type PrivacyHolder = DataHolder<PrivacySchema>;
