//! Field validation for data holders
//!
//! Validation never fails with an `Err`: every check produces formatted
//! error strings of the form `{field}-invalid-{value}` which callers store
//! back into the holder or merge into the store-level error list.

use serde_json::Value;

use crate::constants::PLACEHOLDER_VALUES;
use crate::models::Record;

/// Reason tag used for every field that fails a presence check
pub const INVALID_REASON: &str = "invalid";

/// Format a validation error for `field`
///
/// A missing field renders as `undefined`.
pub fn format_error(field: &str, reason: &str, value: Option<&Value>) -> String {
    format!("{{{field}}}-{reason}-{{{}}}", render_value(value))
}

/// Render a value the way a template literal would
///
/// Magnitudes from `1e21` up use exponent form (`1e+21`). Fractions below
/// `1e-6` print positionally rather than in exponent form.
pub fn render_value(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => {
            if let Some(int) = number.as_i64() {
                int.to_string()
            } else if let Some(uint) = number.as_u64() {
                uint.to_string()
            } else {
                let float = number.as_f64().unwrap_or(f64::NAN);
                if float.abs() >= 1e21 {
                    format!("{float:e}").replacen('e', "e+", 1)
                } else if float.fract() == 0.0 {
                    format!("{float:.0}")
                } else {
                    float.to_string()
                }
            }
        }
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => render_value(Some(other)),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

/// Whether the value is a usable string: present, not blank, not a placeholder
pub fn is_meaningful_string(value: Option<&Value>) -> bool {
    let Some(text) = value.and_then(Value::as_str) else {
        return false;
    };
    let trimmed = text.trim();
    !trimmed.is_empty()
        && !PLACEHOLDER_VALUES
            .iter()
            .any(|placeholder| trimmed.eq_ignore_ascii_case(placeholder))
}

/// Whether the value is a number strictly greater than zero
pub fn is_positive_number(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_f64)
        .is_some_and(crate::utils::number::is_positive)
}

/// Errors for every listed field that is not a meaningful string
pub fn check_required_strings(record: &Record, fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .filter(|field| !is_meaningful_string(record.get(**field)))
        .map(|field| format_error(field, INVALID_REASON, record.get(*field)))
        .collect()
}

/// Errors for every listed field that is not a positive number
pub fn check_positive_numbers(record: &Record, fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .filter(|field| !is_positive_number(record.get(**field)))
        .map(|field| format_error(field, INVALID_REASON, record.get(*field)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_format_error() {
        assert_eq!(
            format_error("title", INVALID_REASON, Some(&json!(""))),
            "{title}-invalid-{}"
        );
        assert_eq!(
            format_error("platform", INVALID_REASON, Some(&json!("unknown"))),
            "{platform}-invalid-{unknown}"
        );
        assert_eq!(
            format_error("type", INVALID_REASON, None),
            "{type}-invalid-{undefined}"
        );
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(Some(&json!(0))), "0");
        assert_eq!(render_value(Some(&json!(-4))), "-4");
        assert_eq!(render_value(Some(&json!(12.0))), "12");
        assert_eq!(render_value(Some(&json!(1.5))), "1.5");
        assert_eq!(render_value(Some(&json!(1e21))), "1e+21");
        assert_eq!(render_value(Some(&json!(1.5e21))), "1.5e+21");
        assert_eq!(render_value(Some(&json!(-2e22))), "-2e+22");
        assert_eq!(render_value(Some(&json!(1e20))), "100000000000000000000");
        assert_eq!(render_value(Some(&json!(null))), "null");
        assert_eq!(render_value(Some(&json!(["a", null, 2]))), "a,,2");
        assert_eq!(render_value(Some(&json!({"k": 1}))), "[object Object]");
    }

    #[test]
    fn test_meaningful_string() {
        assert!(is_meaningful_string(Some(&json!("home"))));
        assert!(!is_meaningful_string(Some(&json!("   "))));
        assert!(!is_meaningful_string(Some(&json!("Unknown"))));
        assert!(!is_meaningful_string(Some(&json!(" TBD "))));
        assert!(!is_meaningful_string(Some(&json!(42))));
        assert!(!is_meaningful_string(None));
    }

    #[test]
    fn test_positive_number() {
        assert!(is_positive_number(Some(&json!(1024))));
        assert!(is_positive_number(Some(&json!(0.5))));
        assert!(!is_positive_number(Some(&json!(0))));
        assert!(!is_positive_number(Some(&json!(-1))));
        assert!(!is_positive_number(Some(&json!("1024"))));
        assert!(!is_positive_number(None));
    }

    #[test]
    fn test_checks_report_in_field_order() {
        let data = record(json!({"name": "Home", "title": "", "width": 0, "height": 768}));
        assert_eq!(
            check_required_strings(&data, &["name", "title", "missing"]),
            vec!["{title}-invalid-{}", "{missing}-invalid-{undefined}"]
        );
        assert_eq!(
            check_positive_numbers(&data, &["width", "height"]),
            vec!["{width}-invalid-{0}"]
        );
    }
}
