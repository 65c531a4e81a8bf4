//! Helpers for JSON records (`serde_json` objects).

use serde_json::{Map, Value};

use crate::models::Record;

/// Whether a value carries no entries
///
/// `null`, empty objects, empty arrays and empty strings are empty; scalar
/// numbers and booleans have no entries either.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(record) => record.is_empty(),
    }
}

pub fn is_not_empty(value: &Value) -> bool {
    !is_empty(value)
}

/// Look up a dot-separated path such as `"user.address.city"`
///
/// Array segments are addressed by index. Returns `None` for a blank path,
/// a missing segment, or a `null` leaf.
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.trim().is_empty() {
        return None;
    }
    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(record) => record.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// New record holding only `keys` that exist in `record`
pub fn pick(record: &Record, keys: &[&str]) -> Record {
    keys.iter()
        .filter_map(|key| record.get(*key).map(|value| (key.to_string(), value.clone())))
        .collect()
}

/// New record without `keys`
pub fn omit(record: &Record, keys: &[&str]) -> Record {
    record
        .iter()
        .filter(|(key, _)| !keys.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

pub fn map_values<F>(record: &Record, mut transform: F) -> Record
where
    F: FnMut(&str, &Value) -> Value,
{
    record
        .iter()
        .map(|(key, value)| (key.clone(), transform(key, value)))
        .collect()
}

pub fn filter<F>(record: &Record, mut keep: F) -> Record
where
    F: FnMut(&str, &Value) -> bool,
{
    record
        .iter()
        .filter(|(key, value)| keep(key, value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Build a record from key/value pairs; later duplicates win
pub fn from_entries<I, K, V>(entries: I) -> Record
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    let mut record = Map::new();
    for (key, value) in entries {
        record.insert(key.into(), value.into());
    }
    record
}

/// Overwrite top-level keys of `target` with those of `partial`
///
/// Nested values are replaced, not merged, and no key is ever removed.
/// Returns `false` (leaving `target` untouched) when `partial` is not an
/// object.
pub fn shallow_merge(target: &mut Record, partial: &Value) -> bool {
    let Some(entries) = partial.as_object() else {
        return false;
    };
    for (key, value) in entries {
        target.insert(key.clone(), value.clone());
    }
    true
}
