//! Quarterly and dashboard analytics for SmartMenu reporting.
//!
//! Raw records come in as loosely-typed JSON. [`normalize`] turns quarterly
//! records into [`QuarterlyMetricOutput`](smartmenu_core::QuarterlyMetricOutput)
//! without ever failing, [`validate`] reports what was wrong with them, and
//! [`metrics`] and [`dashboard`] compute the numbers the reports show.

pub mod coerce;
pub mod dashboard;
pub mod error;
pub mod growth;
pub mod metrics;
pub mod normalize;
pub mod period;
pub mod rules;
pub mod types;
pub mod validate;

pub use dashboard::{
    analytics_summary_from_value, dashboard_analytics, dashboard_metrics, dashboard_performance,
    dashboard_summary, normalize_widgets, DashboardOptions,
};
pub use error::AnalyticsError;
pub use growth::{format_signed_percent, growth_metrics, growth_percent, percent_change};
pub use metrics::{
    average_orders_per_quarter, cagr, metric_growth_rate, orders_delta, qoq_growth,
    summary_statistics, total_active_smart_menus, total_brands, total_locations, total_orders,
    trend_direction, yoy_growth,
};
pub use normalize::{normalize_inputs, normalize_quarter, normalize_quarterly_metrics};
pub use period::{filter_by_period, DateField, TimePeriod};
pub use rules::{
    validate_chronological_order, validate_growth_percentage, validate_quarter_label,
    validate_quarter_order,
};
pub use types::{
    DashboardAnalytics, DashboardMetrics, DashboardPerformance, DashboardSummary, GrowthMetrics,
    MetricGrowth, PerMetric, SummaryStatistics, TrendDirection,
};
pub use validate::{
    validate_quarterly_metrics, validate_quarterly_metrics_detailed, DetailedValidationResult,
    ValidationError, ValidationErrorKind, ValidationResult,
};
