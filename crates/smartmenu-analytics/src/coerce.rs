//! Parse-or-zero numeric coercion for loosely-typed upstream values.

use serde_json::Value;

/// Reads `value` as a finite number, accepting numeric strings and booleans.
///
/// Returns `None` for `null`, absent values, objects, arrays, non-numeric
/// strings and anything that would parse to NaN or infinity.
#[must_use]
pub fn parse_number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().ok()?
            }
        }
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    n.is_finite().then_some(n)
}

/// Like [`parse_number`] but collapses every failure to `0.0`.
#[must_use]
pub fn number_or_zero(value: Option<&Value>) -> f64 {
    parse_number(value).unwrap_or(0.0)
}

/// Reads `record[metric][field]` as a number, if it can be coerced to one.
#[must_use]
pub fn nested_number(record: &Value, metric: &str, field: &str) -> Option<f64> {
    parse_number(record.get(metric).and_then(|m| m.get(field)))
}
