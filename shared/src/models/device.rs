//! Device section: user agent, screen and viewport geometry.

use serde::{Deserialize, Serialize};

use super::{DataHolder, SectionSchema};

/// Typed view of the device section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceData {
    /// The full user agent string
    pub user_agent: String,
    /// Device screen width in pixels
    pub screen_width: u32,
    /// Device screen height in pixels
    pub screen_height: u32,
    /// Viewport width in pixels
    pub viewport_width: u32,
    /// Viewport height in pixels
    pub viewport_height: u32,
    /// Operating system platform
    pub platform: String,
    /// `portrait`, `landscape` or `unknown`
    pub orientation: String,
    /// Breakpoint name (`xsmall`, `small`, `medium`, `large`) or `unknown`
    pub viewport: String,
    #[serde(default)]
    pub validation_errors: Vec<String>,
}

impl Default for DeviceData {
    fn default() -> Self {
        Self {
            user_agent: "unknown".to_string(),
            screen_width: 0,
            screen_height: 0,
            viewport_width: 0,
            viewport_height: 0,
            platform: "unknown".to_string(),
            orientation: "unknown".to_string(),
            viewport: "unknown".to_string(),
            validation_errors: Vec::new(),
        }
    }
}

impl DeviceData {
    /// Defaults with `platform` and `userAgent` read from the running host
    pub fn from_host() -> Self {
        let os = std::env::consts::OS;
        Self {
            user_agent: format!(
                "datalayer/{} ({}; {})",
                crate::VERSION,
                os,
                std::env::consts::ARCH
            ),
            platform: os.to_string(),
            ..Self::default()
        }
    }
}

/// Schema marker for the device section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceSchema;

impl SectionSchema for DeviceSchema {
    const LOGGER_NAME: &'static str = "device-data";
    const REQUIRED_STRINGS: &'static [&'static str] =
        &["userAgent", "platform", "viewport", "orientation"];
    const POSITIVE_NUMBERS: &'static [&'static str] = &[
        "screenWidth",
        "screenHeight",
        "viewportWidth",
        "viewportHeight",
    ];
    type Data = DeviceData;
}

pub type DeviceHolder = DataHolder<DeviceSchema>;

impl DataHolder<DeviceSchema> {
    /// Holder seeded from [`DeviceData::from_host`]
    pub fn from_host() -> Self {
        Self::from_typed(&DeviceData::from_host())
    }
}
