//! Normalization of raw per-quarter records into [`QuarterlyMetricOutput`].
//!
//! Normalization never fails: a malformed record degrades to zeros and the
//! [`UNKNOWN_QUARTER`] label rather than being dropped, so the output always
//! has one entry per input record.

use serde_json::Value;
use smartmenu_core::{QuarterlyMetricInput, QuarterlyMetricOutput, UNKNOWN_QUARTER};

use crate::coerce::nested_number;

/// Normalizes an array of raw quarterly records.
///
/// `None` (no payload), `null`, and any non-array value yield an empty list.
#[must_use]
pub fn normalize_quarterly_metrics(records: Option<&Value>) -> Vec<QuarterlyMetricOutput> {
    match records {
        Some(Value::Array(items)) => items.iter().map(normalize_quarter).collect(),
        Some(other) if !other.is_null() => {
            tracing::debug!("quarterly metrics payload is not an array; normalizing to empty");
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Normalizes a single raw quarterly record.
#[must_use]
pub fn normalize_quarter(record: &Value) -> QuarterlyMetricOutput {
    let quarter = match record.get("quarterLabel") {
        Some(Value::String(label)) if !label.is_empty() => label.clone(),
        _ => {
            tracing::debug!("quarter record has no usable label");
            UNKNOWN_QUARTER.to_string()
        }
    };

    // Upstream sometimes reports the active-menu count in place of brands.
    let brands = nested_number(record, "brands", "count")
        .or_else(|| {
            let proxy = nested_number(record, "activeSmartMenus", "count");
            if proxy.is_some() {
                tracing::debug!(quarter = %quarter, "brand count taken from activeSmartMenus");
            }
            proxy
        })
        .unwrap_or(0.0);

    let field = |metric: &str, name: &str| nested_number(record, metric, name).unwrap_or(0.0);

    QuarterlyMetricOutput {
        brands,
        locations: field("locations", "count"),
        active_smart_menus: field("activeSmartMenus", "count"),
        orders: field("orders", "count"),
        orders_qoq_growth: field("orders", "qoqGrowthPercent"),
        quarter,
    }
}

/// Normalizes typed inputs through the same rules as raw JSON records.
#[must_use]
pub fn normalize_inputs(inputs: &[QuarterlyMetricInput]) -> Vec<QuarterlyMetricOutput> {
    inputs
        .iter()
        .map(|input| {
            serde_json::to_value(input)
                .map_or_else(|_| QuarterlyMetricOutput::default(), |v| normalize_quarter(&v))
        })
        .collect()
}
