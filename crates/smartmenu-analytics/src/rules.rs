//! Standalone checks for quarter labels, growth bounds and quarter ordering.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use smartmenu_core::QuarterlyMetricOutput;

use crate::validate::{ValidationError, ValidationErrorKind, ValidationResult};

/// Growth percentages above this are treated as data errors.
pub const MAX_GROWTH_PERCENT: f64 = 1000.0;
/// A metric cannot shrink by more than all of it.
pub const MIN_GROWTH_PERCENT: f64 = -100.0;

static QUARTER_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:Q[1-4]\s+\d{4}|Quarter\s+[1-4]\s+\d{4}|\d{4}-Q[1-4])$")
        .expect("valid quarter label regex")
});

static QUARTER_ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Q([1-4])\s+(\d{4})").expect("valid quarter ordinal regex"));

/// Accepts `Q3 2025`, `Quarter 3 2025` and `2025-Q3`, case-insensitively.
///
/// # Errors
///
/// Returns a [`ValidationErrorKind::Format`] error for any other label.
pub fn validate_quarter_label(label: &str) -> Result<(), ValidationError> {
    if QUARTER_LABEL_RE.is_match(label.trim()) {
        return Ok(());
    }
    Err(ValidationError::new(
        "quarterLabel",
        ValidationErrorKind::Format,
        format!("Invalid quarter label format: \"{label}\" (expected \"Q1 2025\", \"Quarter 1 2025\" or \"2025-Q1\")"),
    )
    .with_value(Value::String(label.to_string())))
}

/// Rejects growth percentages outside `[-100, 1000]`.
///
/// # Errors
///
/// Returns a [`ValidationErrorKind::Range`] error for out-of-bounds values and
/// a [`ValidationErrorKind::Type`] error for NaN or infinite values.
pub fn validate_growth_percentage(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new(
            "qoqGrowthPercent",
            ValidationErrorKind::Type,
            "Growth percentage must be a finite number",
        ));
    }

    let message = if value > MAX_GROWTH_PERCENT {
        format!("Growth percentage {value}% exceeds the maximum of {MAX_GROWTH_PERCENT}%")
    } else if value < MIN_GROWTH_PERCENT {
        format!("Growth percentage {value}% is below the minimum of {MIN_GROWTH_PERCENT}%")
    } else {
        return Ok(());
    };

    let number = serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number);
    Err(
        ValidationError::new("qoqGrowthPercent", ValidationErrorKind::Range, message)
            .with_value(number),
    )
}

/// Maps a label containing `Q<n> <year>` to `year * 4 + n`.
///
/// Returns `None` when the label has no such pattern.
#[must_use]
pub fn quarter_ordinal(label: &str) -> Option<u32> {
    let caps = QUARTER_ORDINAL_RE.captures(label)?;
    let quarter: u32 = caps[1].parse().ok()?;
    let year: u32 = caps[2].parse().ok()?;
    Some(year * 4 + quarter)
}

/// Checks that labels run newest-first.
///
/// Each adjacent pair whose labels both parse must be strictly decreasing;
/// gaps between quarters are fine. Pairs involving an unparseable label are
/// skipped.
#[must_use]
pub fn validate_chronological_order<S: AsRef<str>>(labels: &[S]) -> ValidationResult {
    let errors = labels
        .windows(2)
        .filter_map(|pair| {
            let (current, next) = (pair[0].as_ref(), pair[1].as_ref());
            let current_value = quarter_ordinal(current)?;
            let next_value = quarter_ordinal(next)?;
            (current_value <= next_value).then(|| {
                format!(
                    "Quarters must be in descending chronological order: \"{current}\" should come after \"{next}\""
                )
            })
        })
        .collect();
    ValidationResult::from_errors(errors)
}

/// [`validate_chronological_order`] over the labels of normalized quarters.
#[must_use]
pub fn validate_quarter_order(data: &[QuarterlyMetricOutput]) -> ValidationResult {
    let labels: Vec<&str> = data.iter().map(|q| q.quarter.as_str()).collect();
    validate_chronological_order(&labels)
}
