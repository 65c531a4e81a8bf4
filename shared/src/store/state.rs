//! Aggregated application state and the events the store publishes.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Value};
use std::fmt;

use crate::constants::{DEFAULT_APP_NAME, DEFAULT_APP_VERSION};
use crate::models::{DeviceHolder, PageHolder, PrivacyHolder, Record};

/// One named slice of the application state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Device,
    Page,
    Privacy,
    User,
    Marketing,
    Cart,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Device,
        Section::Page,
        Section::Privacy,
        Section::User,
        Section::Marketing,
        Section::Cart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Device => "device",
            Section::Page => "page",
            Section::Privacy => "privacy",
            Section::User => "user",
            Section::Marketing => "marketing",
            Section::Cart => "cart",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full application state owned by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationState {
    /// Application identity (`appName`, `version`)
    #[serde(rename = "myAppData")]
    pub app: Record,
    pub device: Record,
    pub page: Record,
    pub privacy: Record,
    #[serde(default)]
    pub user: Record,
    #[serde(default)]
    pub marketing: Record,
    #[serde(default)]
    pub cart: Record,
    /// De-duplicated validation errors gathered from every section
    #[serde(default)]
    pub validation_errors: Vec<String>,
}

impl ApplicationState {
    /// State with section defaults and the given application identity
    pub fn new(app_name: &str, version: &str) -> Self {
        let app = match json!({ "appName": app_name, "version": version }) {
            Value::Object(record) => record,
            _ => Record::new(),
        };
        Self {
            app,
            device: DeviceHolder::default_values(),
            page: PageHolder::default_values(),
            privacy: PrivacyHolder::default_values(),
            user: Record::new(),
            marketing: Record::new(),
            cart: Record::new(),
            validation_errors: Vec::new(),
        }
    }

    pub fn section(&self, section: Section) -> &Record {
        match section {
            Section::Device => &self.device,
            Section::Page => &self.page,
            Section::Privacy => &self.privacy,
            Section::User => &self.user,
            Section::Marketing => &self.marketing,
            Section::Cart => &self.cart,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut Record {
        match section {
            Section::Device => &mut self.device,
            Section::Page => &mut self.page,
            Section::Privacy => &mut self.privacy,
            Section::User => &mut self.user,
            Section::Marketing => &mut self.marketing,
            Section::Cart => &mut self.cart,
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self::new(DEFAULT_APP_NAME, DEFAULT_APP_VERSION)
    }
}

/// Which part of the state an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventScope {
    /// Store-wide event
    All,
    Section(Section),
}

impl EventScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventScope::All => "all",
            EventScope::Section(section) => section.as_str(),
        }
    }
}

impl From<Section> for EventScope {
    fn from(section: Section) -> Self {
        EventScope::Section(section)
    }
}

impl fmt::Display for EventScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Payload delivered to every listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreEvent {
    pub message: String,
    pub section: EventScope,
}

impl StoreEvent {
    pub fn new(message: impl Into<String>, section: impl Into<EventScope>) -> Self {
        Self {
            message: message.into(),
            section: section.into(),
        }
    }

    pub fn to_value(&self) -> Value {
        json!({ "message": self.message, "section": self.section.as_str() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_shape() {
        let state = ApplicationState::default();
        assert_eq!(state.app["appName"], json!(DEFAULT_APP_NAME));
        assert_eq!(state.app["version"], json!(DEFAULT_APP_VERSION));
        assert_eq!(state.device["platform"], json!("unknown"));
        assert_eq!(state.page["title"], json!(""));
        assert_eq!(state.privacy["notice_behavior"], json!("tbd"));
        assert!(state.user.is_empty());
        assert!(state.validation_errors.is_empty());
    }

    #[test]
    fn test_serialized_keys() {
        let value = ApplicationState::new("shop", "2.0.0").to_value();
        assert_eq!(value["myAppData"]["appName"], json!("shop"));
        assert!(value.get("validationErrors").is_some());
        assert!(value.get("cart").is_some());
    }

    #[test]
    fn test_state_deserializes_without_placeholders() {
        let state: ApplicationState = serde_json::from_value(json!({
            "myAppData": {"appName": "a", "version": "1"},
            "device": {},
            "page": {},
            "privacy": {}
        }))
        .unwrap();
        assert!(state.cart.is_empty());
        assert!(state.validation_errors.is_empty());
    }

    #[test]
    fn test_section_accessors() {
        let mut state = ApplicationState::default();
        state
            .section_mut(Section::Cart)
            .insert("items".to_string(), json!(2));
        assert_eq!(state.section(Section::Cart)["items"], json!(2));
        assert_eq!(Section::ALL.len(), 6);
    }

    #[test]
    fn test_event_serialization() {
        let event = StoreEvent::new("data-updated", Section::Device);
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"message": "data-updated", "section": "device"})
        );
        assert_eq!(event.to_value(), serde_json::to_value(&event).unwrap());
        assert_eq!(StoreEvent::new("data-ready", EventScope::All).section.to_string(), "all");
    }
}
