//! Data holders for the data layer
//!
//! Each section of the application state (device, page, privacy) is owned by
//! a [`DataHolder`] parameterized over a [`SectionSchema`]. The schema names
//! the default field set, the typed view of the record, and which fields are
//! validated. The set of schemas is closed, so everything is resolved
//! statically.

pub mod device;
pub mod page;
pub mod privacy;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;

use crate::constants::VALIDATION_ERRORS_FIELD;
use crate::error::{SharedError, SharedResult};
use crate::logging::Logger;
use crate::utils::object;
use crate::validation;

pub use device::{DeviceData, DeviceHolder, DeviceSchema};
pub use page::{PageData, PageHolder, PageSchema};
pub use privacy::{PrivacyData, PrivacyHolder, PrivacySchema};

/// Field-name to value mapping held by every section
pub type Record = Map<String, Value>;

/// Static description of one section's record shape
pub trait SectionSchema {
    /// Name used for logging (`device-data`, `page-data`, ...)
    const LOGGER_NAME: &'static str;

    /// Fields that must hold a non-blank, non-placeholder string
    const REQUIRED_STRINGS: &'static [&'static str];

    /// Fields that must hold a number greater than zero
    const POSITIVE_NUMBERS: &'static [&'static str] = &[];

    /// Typed view of the record; its `Default` is the default field set
    type Data: Serialize + DeserializeOwned + Default;

    fn default_values() -> Record {
        to_record(&Self::Data::default())
    }

    fn validate(record: &Record) -> Vec<String> {
        let mut errors = validation::check_required_strings(record, Self::REQUIRED_STRINGS);
        errors.extend(validation::check_positive_numbers(
            record,
            Self::POSITIVE_NUMBERS,
        ));
        errors
    }
}

/// Serialize a typed section into a record; non-object output yields an empty record
pub fn to_record<T: Serialize>(data: &T) -> Record {
    match serde_json::to_value(data) {
        Ok(Value::Object(record)) => record,
        _ => Record::new(),
    }
}

/// Mutable field mapping for one section, seeded with the schema defaults
pub struct DataHolder<S: SectionSchema> {
    data: Record,
    _schema: PhantomData<S>,
}

impl<S: SectionSchema> DataHolder<S> {
    /// Create a holder with the schema's default values
    pub fn new() -> Self {
        Self {
            data: S::default_values(),
            _schema: PhantomData,
        }
    }

    /// Create a holder with defaults overlaid by `initial`
    ///
    /// A non-object `initial` is ignored, as with [`DataHolder::set`].
    pub fn with_data(initial: &Value) -> Self {
        let mut holder = Self::new();
        holder.set(initial);
        holder
    }

    /// Create a holder from the typed view of the record
    pub fn from_typed(data: &S::Data) -> Self {
        let mut holder = Self::new();
        holder.set(&Value::Object(to_record(data)));
        holder
    }

    /// The schema's default field set
    pub fn default_values() -> Record {
        S::default_values()
    }

    /// Copy of the current record
    pub fn get(&self) -> Record {
        self.data.clone()
    }

    /// Copy of the current record as a JSON value
    pub fn to_value(&self) -> Value {
        Value::Object(self.get())
    }

    /// Shallow-merge `partial` into the record
    ///
    /// Existing fields are overwritten, new ones added, none removed. A
    /// `partial` that is not an object is ignored.
    pub fn set(&mut self, partial: &Value) {
        if !object::shallow_merge(&mut self.data, partial) {
            Logger::new(S::LOGGER_NAME).debug("Ignoring non-object update");
        }
    }

    pub fn get_property(&self, key: &str) -> Option<Value> {
        self.data.get(key).cloned()
    }

    /// Write one field without validation
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    /// Validation errors for the current record, recomputed on every call
    pub fn get_data_errors(&self) -> Vec<String> {
        S::validate(&self.data)
    }

    pub fn is_valid(&self) -> bool {
        self.get_data_errors().is_empty()
    }

    /// Compute the validation errors and store them in `validationErrors`
    pub fn record_validation_errors(&mut self) -> Vec<String> {
        let errors = self.get_data_errors();
        if !errors.is_empty() {
            Logger::new(S::LOGGER_NAME).debug_with(
                "Validation errors collected",
                &[Value::from(errors.len())],
            );
        }
        self.set_property(VALIDATION_ERRORS_FIELD, errors.clone());
        errors
    }

    /// Deserialize the record into the schema's typed view
    ///
    /// # Errors
    /// * `SharedError::Serialization` - If a field holds a value of the wrong type
    pub fn to_typed(&self) -> SharedResult<S::Data> {
        serde_json::from_value(self.to_value()).map_err(|e| SharedError::Serialization {
            message: format!("{} record does not match its schema: {e}", S::LOGGER_NAME),
        })
    }
}

impl<S: SectionSchema> Default for DataHolder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SectionSchema> Clone for DataHolder<S> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            _schema: PhantomData,
        }
    }
}

impl<S: SectionSchema> PartialEq for DataHolder<S> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<S: SectionSchema> fmt::Debug for DataHolder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataHolder")
            .field("section", &S::LOGGER_NAME)
            .field("data", &self.data)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_merges_instead_of_replacing() {
        let mut page = PageHolder::new();
        page.set(&json!({"name": "Home", "title": "Welcome"}));
        page.set(&json!({"title": "Hello"}));

        let data = page.get();
        assert_eq!(data["name"], json!("Home"));
        assert_eq!(data["title"], json!("Hello"));
        for key in PageHolder::default_values().keys() {
            assert!(data.contains_key(key), "default field {key} was dropped");
        }
    }

    #[test]
    fn test_get_returns_isolated_copies() {
        let holder = DeviceHolder::new();
        let mut first = holder.get();
        let second = holder.get();
        assert_eq!(first, second);

        first.insert("platform".to_string(), json!("mutated"));
        assert_eq!(holder.get_property("platform"), Some(json!("unknown")));
        assert_eq!(holder.get(), second);
    }

    #[test]
    fn test_non_object_set_is_ignored() {
        let mut holder = PrivacyHolder::new();
        let before = holder.get();
        holder.set(&json!("oops"));
        holder.set(&json!([1, 2, 3]));
        holder.set(&Value::Null);
        assert_eq!(holder.get(), before);
    }

    #[test]
    fn test_set_property_bypasses_validation() {
        let mut page = PageHolder::new();
        page.set_property("title", 42);
        assert_eq!(page.get_property("title"), Some(json!(42)));
        assert_eq!(page.get_property("missing"), None);
        assert!(page
            .get_data_errors()
            .contains(&"{title}-invalid-{42}".to_string()));
    }

    #[test]
    fn test_record_validation_errors_writes_back() {
        let mut page = PageHolder::with_data(&json!({"type": "home", "name": "Home"}));
        let errors = page.record_validation_errors();
        assert_eq!(errors, vec!["{pathName}-invalid-{}", "{title}-invalid-{}"]);
        assert_eq!(
            page.get_property(VALIDATION_ERRORS_FIELD),
            Some(json!(["{pathName}-invalid-{}", "{title}-invalid-{}"]))
        );
    }

    #[test]
    fn test_to_typed_round_trip_and_mismatch() {
        let page = PageHolder::with_data(&json!({"type": "product", "title": "Shoes"}));
        let typed = page.to_typed().unwrap();
        assert_eq!(typed.page_type, "product");
        assert_eq!(PageHolder::from_typed(&typed), page);

        let mut broken = DeviceHolder::new();
        broken.set_property("screenWidth", "wide");
        assert!(matches!(
            broken.to_typed(),
            Err(SharedError::Serialization { .. })
        ));
    }
}
