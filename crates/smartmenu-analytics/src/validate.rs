//! Structural validation of raw quarterly records.
//!
//! Validation is informational: it never fails and never alters the data.
//! Callers decide whether to block, warn, or ignore based on the result.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Sub-metrics whose primary field is `count`, in the order they are checked.
const COUNT_METRICS: [&str; 4] = ["orders", "locations", "activeSmartMenus", "brands"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationErrorKind {
    Required,
    Type,
    Range,
    Format,
    Order,
    Incomplete,
}

/// One itemized validation finding. Used for both errors and warnings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Field path within a record, e.g. `"orders.count"`.
    pub field: String,
    #[serde(rename = "type")]
    pub kind: ValidationErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}

impl ValidationError {
    pub(crate) fn new(
        field: impl Into<String>,
        kind: ValidationErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
            value: None,
            expected: None,
            received: None,
        }
    }

    #[must_use]
    pub(crate) fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub(crate) fn expected(mut self, expected: &str, received: Option<&Value>) -> Self {
        self.expected = Some(expected.to_string());
        self.received = Some(json_type_name(received).to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    #[must_use]
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    /// Suspicious but acceptable values. Never affects `is_valid`.
    pub warnings: Vec<ValidationError>,
    /// `errors` grouped by field path.
    pub field_errors: BTreeMap<String, Vec<ValidationError>>,
}

/// Checks raw quarterly records and returns their error messages.
#[must_use]
pub fn validate_quarterly_metrics(records: &Value) -> ValidationResult {
    let detailed = validate_quarterly_metrics_detailed(records);
    ValidationResult::from_errors(detailed.errors.into_iter().map(|e| e.message).collect())
}

/// Checks raw quarterly records, separating errors from warnings.
///
/// Warnings are raised for negative numeric values and for records that
/// carry none of the four core sub-metrics.
#[must_use]
pub fn validate_quarterly_metrics_detailed(records: &Value) -> DetailedValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    match records {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                validate_item(index, item, &mut errors, &mut warnings);
            }
        }
        other => errors.push(
            ValidationError::new(
                "quarterlyMetrics",
                ValidationErrorKind::Type,
                "Quarterly metrics must be an array",
            )
            .expected("array", Some(other)),
        ),
    }

    if !errors.is_empty() {
        tracing::debug!(
            errors = errors.len(),
            warnings = warnings.len(),
            "quarterly metrics failed validation"
        );
    }

    let mut field_errors: BTreeMap<String, Vec<ValidationError>> = BTreeMap::new();
    for error in &errors {
        field_errors
            .entry(error.field.clone())
            .or_default()
            .push(error.clone());
    }

    DetailedValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        field_errors,
    }
}

fn validate_item(
    index: usize,
    item: &Value,
    errors: &mut Vec<ValidationError>,
    warnings: &mut Vec<ValidationError>,
) {
    let prefix = format!("Item {index}");

    if !item.is_object() {
        errors.push(
            ValidationError::new(
                "item",
                ValidationErrorKind::Type,
                format!("{prefix}: must be an object"),
            )
            .expected("object", Some(item)),
        );
        return;
    }

    match item.get("quarterLabel") {
        Some(Value::String(_)) => {}
        label @ (None | Some(Value::Null)) => errors.push(
            ValidationError::new(
                "quarterLabel",
                ValidationErrorKind::Required,
                format!("{prefix}: quarterLabel is required and must be a string"),
            )
            .expected("string", label),
        ),
        Some(label) => errors.push(
            ValidationError::new(
                "quarterLabel",
                ValidationErrorKind::Type,
                format!("{prefix}: quarterLabel is required and must be a string"),
            )
            .with_value(label.clone())
            .expected("string", Some(label)),
        ),
    }

    for metric in COUNT_METRICS {
        validate_sub_metric(&prefix, item, metric, "count", errors, warnings);
    }
    validate_sub_metric(&prefix, item, "totalRevenue", "amount", errors, warnings);

    let has_core_metric = COUNT_METRICS
        .iter()
        .any(|metric| item.get(*metric).is_some_and(|v| !v.is_null()));
    if !has_core_metric {
        warnings.push(ValidationError::new(
            "item",
            ValidationErrorKind::Incomplete,
            format!("{prefix}: no core metrics present (orders, locations, activeSmartMenus, brands)"),
        ));
    }
}

fn validate_sub_metric(
    prefix: &str,
    item: &Value,
    metric: &str,
    primary: &str,
    errors: &mut Vec<ValidationError>,
    warnings: &mut Vec<ValidationError>,
) {
    let sub = match item.get(metric) {
        None | Some(Value::Null) => return,
        Some(sub) if sub.is_object() => sub,
        Some(other) => {
            errors.push(
                ValidationError::new(
                    metric,
                    ValidationErrorKind::Type,
                    format!("{prefix}: {metric} must be an object"),
                )
                .with_value(other.clone())
                .expected("object", Some(other)),
            );
            return;
        }
    };

    let mut check = |field: &str, required: bool| {
        let path = format!("{metric}.{field}");
        match sub.get(field) {
            Some(Value::Number(n)) => {
                if n.as_f64().is_some_and(|v| v < 0.0) {
                    warnings.push(
                        ValidationError::new(
                            path.as_str(),
                            ValidationErrorKind::Range,
                            format!("{prefix}: {path} is negative ({n})"),
                        )
                        .with_value(Value::Number(n.clone())),
                    );
                }
            }
            None if !required => {}
            value => {
                let mut error = ValidationError::new(
                    path.as_str(),
                    ValidationErrorKind::Type,
                    format!("{prefix}: {path} must be a number"),
                )
                .expected("number", value);
                if let Some(v) = value {
                    error = error.with_value(v.clone());
                }
                errors.push(error);
            }
        }
    };

    check(primary, true);
    check("qoqGrowth", false);
    check("qoqGrowthPercent", false);
}

/// JSON type name of `value`, with `"undefined"` for an absent value.
pub(crate) fn json_type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}
