use serde::Serialize;
use smartmenu_core::MetricKey;

/// Current-versus-previous comparison of a single value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthMetrics {
    pub current: f64,
    pub previous: f64,
    /// Absolute change, `current - previous`.
    pub growth: f64,
    pub growth_percent: f64,
    /// `true` when `growth >= 0`.
    pub is_positive: bool,
}

/// One value per quarterly count metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerMetric<T> {
    pub brands: T,
    pub locations: T,
    pub active_smart_menus: T,
    pub orders: T,
}

impl<T> PerMetric<T> {
    pub fn from_fn(mut f: impl FnMut(MetricKey) -> T) -> Self {
        Self {
            brands: f(MetricKey::Brands),
            locations: f(MetricKey::Locations),
            active_smart_menus: f(MetricKey::ActiveSmartMenus),
            orders: f(MetricKey::Orders),
        }
    }

    #[must_use]
    pub fn get(&self, key: MetricKey) -> &T {
        match key {
            MetricKey::Brands => &self.brands,
            MetricKey::Locations => &self.locations,
            MetricKey::ActiveSmartMenus => &self.active_smart_menus,
            MetricKey::Orders => &self.orders,
        }
    }
}

/// Growth percentages keyed by metric, as produced by the QoQ and YoY batches.
pub type MetricGrowth = PerMetric<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Increasing => write!(f, "increasing"),
            TrendDirection::Decreasing => write!(f, "decreasing"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// Everything a quarterly report header needs in one call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStatistics {
    pub quarter_count: usize,
    pub latest_quarter: String,
    pub total_orders: f64,
    pub total_brands: f64,
    pub total_locations: f64,
    pub total_active_smart_menus: f64,
    pub average_orders_per_quarter: f64,
    /// `None` when only one quarter is available.
    pub qoq_growth: Option<MetricGrowth>,
    pub trends: PerMetric<TrendDirection>,
}

/// A dashboard trend: the raw comparison plus its display delta.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendMetric {
    #[serde(flatten)]
    pub growth: GrowthMetrics,
    /// e.g. `"+20.0%"`.
    pub change: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTrends {
    pub period_days: i64,
    /// Widgets created in each window.
    pub total: TrendMetric,
    /// Widgets published in each window.
    pub active: TrendMetric,
    /// Locations on widgets created in each window.
    pub locations: TrendMetric,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_widgets: usize,
    pub active_widgets: usize,
    pub total_locations: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trends: Option<DashboardTrends>,
}

/// Feature usage as percentages of active widgets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureUsage {
    pub images: f64,
    pub card_layout: f64,
    pub ordering: f64,
    pub byo: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAnalytics {
    pub total_widgets: usize,
    pub total_active: f64,
    pub features: FeatureUsage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_widgets: usize,
    pub active_widgets: usize,
    pub total_locations: f64,
    /// Active widgets as a percentage of all widgets.
    pub activation_rate: f64,
    pub average_locations_per_menu: f64,
    pub features: FeatureUsage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPerformance {
    pub period_days: i64,
    /// Percentage change in widgets created, current window vs previous.
    pub growth_rate: f64,
    /// Display delta of widgets published, current window vs previous.
    pub activation_trend: String,
    /// Percentage change in locations on newly created widgets.
    pub location_growth: f64,
    pub feature_adoption: FeatureUsage,
}
