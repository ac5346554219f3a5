//! Per-quarter business metric records, before and after normalization.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label given to a normalized quarter whose input carried no usable label.
pub const UNKNOWN_QUARTER: &str = "Unknown Quarter";

/// The four count metrics every normalized quarter carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    Brands,
    Locations,
    ActiveSmartMenus,
    Orders,
}

impl MetricKey {
    pub const ALL: [MetricKey; 4] = [
        MetricKey::Brands,
        MetricKey::Locations,
        MetricKey::ActiveSmartMenus,
        MetricKey::Orders,
    ];

    /// Field name as it appears in raw and normalized JSON records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKey::Brands => "brands",
            MetricKey::Locations => "locations",
            MetricKey::ActiveSmartMenus => "activeSmartMenus",
            MetricKey::Orders => "orders",
        }
    }
}

impl std::fmt::Display for MetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown metric '{0}'; expected brands, locations, activeSmartMenus or orders")]
pub struct UnknownMetricKey(pub String);

impl std::str::FromStr for MetricKey {
    type Err = UnknownMetricKey;

    /// Accepts the JSON field name or its snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brands" => Ok(MetricKey::Brands),
            "locations" => Ok(MetricKey::Locations),
            "activeSmartMenus" | "active_smart_menus" => Ok(MetricKey::ActiveSmartMenus),
            "orders" => Ok(MetricKey::Orders),
            other => Err(UnknownMetricKey(other.to_string())),
        }
    }
}

/// A count-style sub-metric (`brands`, `locations`, `orders`, `activeSmartMenus`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountMetric {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<f64>,
    /// Absolute change from the previous quarter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qoq_growth: Option<f64>,
    /// Percentage change from the previous quarter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qoq_growth_percent: Option<f64>,
}

impl CountMetric {
    #[must_use]
    pub fn with_count(count: f64) -> Self {
        Self {
            count: Some(count),
            ..Self::default()
        }
    }
}

/// The revenue sub-metric; same shape as [`CountMetric`] keyed on `amount`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueMetric {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qoq_growth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qoq_growth_percent: Option<f64>,
}

/// One quarter of well-typed upstream data. Every field may be absent.
///
/// Upstream payloads are frequently not this well-behaved (numeric strings,
/// `null`s, wrong shapes), so the engine consumes raw `serde_json::Value`s;
/// this type is for callers that already hold typed data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyMetricInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brands: Option<CountMetric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<CountMetric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders: Option<CountMetric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_smart_menus: Option<CountMetric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_revenue: Option<RevenueMetric>,
}

/// A fully-defaulted quarter. No field is ever missing or non-numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyMetricOutput {
    pub quarter: String,
    pub brands: f64,
    pub locations: f64,
    pub active_smart_menus: f64,
    pub orders: f64,
    #[serde(rename = "ordersQoQGrowth")]
    pub orders_qoq_growth: f64,
}

impl Default for QuarterlyMetricOutput {
    fn default() -> Self {
        Self {
            quarter: UNKNOWN_QUARTER.to_string(),
            brands: 0.0,
            locations: 0.0,
            active_smart_menus: 0.0,
            orders: 0.0,
            orders_qoq_growth: 0.0,
        }
    }
}

impl QuarterlyMetricOutput {
    /// Returns the value of one of the four count metrics.
    #[must_use]
    pub fn metric(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::Brands => self.brands,
            MetricKey::Locations => self.locations,
            MetricKey::ActiveSmartMenus => self.active_smart_menus,
            MetricKey::Orders => self.orders,
        }
    }
}

impl From<&QuarterlyMetricOutput> for QuarterlyMetricInput {
    /// Rebuilds the input shape from a normalized quarter, so that
    /// normalizing the result reproduces `output` exactly.
    fn from(output: &QuarterlyMetricOutput) -> Self {
        Self {
            quarter_label: Some(output.quarter.clone()),
            brands: Some(CountMetric::with_count(output.brands)),
            locations: Some(CountMetric::with_count(output.locations)),
            orders: Some(CountMetric {
                count: Some(output.orders),
                qoq_growth: None,
                qoq_growth_percent: Some(output.orders_qoq_growth),
            }),
            active_smart_menus: Some(CountMetric::with_count(output.active_smart_menus)),
            total_revenue: None,
        }
    }
}
