//! Numeric helpers for checks, clamping, rounding and formatting.

use rand::{thread_rng, Rng};

use super::{UtilError, UtilResult};

pub fn is_number(value: f64) -> bool {
    !value.is_nan()
}

pub fn is_integer(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

pub fn is_positive(value: f64) -> bool {
    is_number(value) && value > 0.0
}

pub fn is_negative(value: f64) -> bool {
    is_number(value) && value < 0.0
}

pub fn is_zero(value: f64) -> bool {
    value == 0.0
}

/// Clamp `value` into `[min, max]`
///
/// # Errors
/// * `UtilError::InvalidArgument` - If any argument is NaN or `min > max`
pub fn clamp(value: f64, min: f64, max: f64) -> UtilResult<f64> {
    if !is_number(value) || !is_number(min) || !is_number(max) {
        return Err(UtilError::invalid(
            "clamp",
            "all arguments must be valid numbers",
        ));
    }
    if min > max {
        return Err(UtilError::invalid(
            "clamp",
            format!("min ({min}) is greater than max ({max})"),
        ));
    }
    Ok(value.clamp(min, max))
}

/// Round to `decimal_places`, halves rounding toward positive infinity
///
/// # Errors
/// * `UtilError::InvalidArgument` - If `value` is NaN
pub fn round(value: f64, decimal_places: u32) -> UtilResult<f64> {
    if !is_number(value) {
        return Err(UtilError::invalid("round", "value must be a number"));
    }
    let exponent = i32::try_from(decimal_places)
        .map_err(|_| UtilError::invalid("round", "too many decimal places"))?;
    let factor = 10f64.powi(exponent);
    Ok((value * factor + 0.5).floor() / factor)
}

/// Random integer in `[min, max]`; reversed bounds are swapped
pub fn random_int(min: i64, max: i64) -> i64 {
    let (low, high) = if min > max { (max, min) } else { (min, max) };
    thread_rng().gen_range(low..=high)
}

/// Fixed-point rendering with `decimal_places` digits
///
/// # Errors
/// * `UtilError::InvalidArgument` - If `value` is NaN
pub fn format_decimal(value: f64, decimal_places: usize) -> UtilResult<String> {
    if !is_number(value) {
        return Err(UtilError::invalid("format_decimal", "value must be a number"));
    }
    Ok(format!("{value:.decimal_places$}"))
}

/// Parse a number, falling back to `default` for blank or unparsable input
pub fn to_numeric(input: &str, default: f64) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(parsed) if is_number(parsed) => parsed,
        _ => default,
    }
}

/// `part` as a percentage of `total`; `0.0` when `total` is zero
///
/// # Errors
/// * `UtilError::InvalidArgument` - If either argument is NaN
pub fn percentage(part: f64, total: f64) -> UtilResult<f64> {
    if !is_number(part) || !is_number(total) {
        return Err(UtilError::invalid(
            "percentage",
            "part and total must be valid numbers",
        ));
    }
    if total == 0.0 {
        return Ok(0.0);
    }
    Ok(part / total * 100.0)
}

/// Inclusive range check
///
/// # Errors
/// * `UtilError::InvalidArgument` - If any argument is NaN
pub fn is_in_range(value: f64, min: f64, max: f64) -> UtilResult<bool> {
    if !is_number(value) || !is_number(min) || !is_number(max) {
        return Err(UtilError::invalid(
            "is_in_range",
            "all arguments must be valid numbers",
        ));
    }
    Ok(value >= min && value <= max)
}
