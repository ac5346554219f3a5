//! Dashboard-level aggregates over raw SmartMenu widget records.
//!
//! Unlike quarterly normalization, these functions refuse to produce numbers
//! from nothing: a non-array payload or one without a single valid widget is
//! an error.

use chrono::{DateTime, Utc};
use serde_json::Value;
use smartmenu_core::{AnalyticsSummary, SmartMenuWidget};

use crate::coerce::number_or_zero;
use crate::error::AnalyticsError;
use crate::growth::{growth_metrics, growth_percent, percent_change};
use crate::period::{filter_by_period, DateField, TimePeriod};
use crate::types::{
    DashboardAnalytics, DashboardMetrics, DashboardPerformance, DashboardSummary,
    DashboardTrends, FeatureUsage, TrendMetric,
};

pub const DEFAULT_TREND_DAYS: i64 = 30;

/// Caller-supplied context for time-dependent aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    /// The instant windows are measured back from.
    pub now: DateTime<Utc>,
    pub trend_days: i64,
    pub include_trends: bool,
}

impl DashboardOptions {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            trend_days: DEFAULT_TREND_DAYS,
            include_trends: true,
        }
    }

    #[must_use]
    pub fn with_trend_days(mut self, days: i64) -> Self {
        self.trend_days = days;
        self
    }

    #[must_use]
    pub fn with_trends(mut self, include: bool) -> Self {
        self.include_trends = include;
        self
    }

    /// The current window and the one before it.
    fn periods(&self) -> Result<(TimePeriod, TimePeriod), AnalyticsError> {
        let current = TimePeriod::trailing(self.now, self.trend_days)?;
        let previous = current.preceding().ok_or(AnalyticsError::InvalidPeriod {
            days: self.trend_days,
        })?;
        Ok((current, previous))
    }
}

/// Extracts the widgets that have a string `id` and a string `createdAt`.
///
/// # Errors
///
/// Returns [`AnalyticsError::NotAnArray`] for a non-array payload and
/// [`AnalyticsError::NoValidWidgets`] when nothing survives the filter.
pub fn normalize_widgets(raw: &Value) -> Result<Vec<SmartMenuWidget>, AnalyticsError> {
    let Value::Array(items) = raw else {
        return Err(AnalyticsError::NotAnArray { what: "widgets" });
    };

    let widgets: Vec<SmartMenuWidget> = items.iter().filter_map(widget_from_value).collect();

    if widgets.len() < items.len() {
        tracing::debug!(
            dropped = items.len() - widgets.len(),
            kept = widgets.len(),
            "dropped widgets without string id/createdAt"
        );
    }
    if widgets.is_empty() {
        return Err(AnalyticsError::NoValidWidgets);
    }
    Ok(widgets)
}

fn widget_from_value(raw: &Value) -> Option<SmartMenuWidget> {
    let id = raw.get("id")?.as_str()?;
    let created_at = raw.get("createdAt")?.as_str()?;
    let published_at = raw
        .get("publishedAt")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Some(SmartMenuWidget {
        id: id.to_string(),
        created_at: created_at.to_string(),
        published_at,
        number_of_locations: number_or_zero(raw.get("numberOfLocations")),
    })
}

/// Reads the externally supplied feature-usage counts; missing or
/// non-numeric counts become `0`.
#[must_use]
pub fn analytics_summary_from_value(raw: &Value) -> AnalyticsSummary {
    let field = |name: &str| number_or_zero(raw.get(name));
    AnalyticsSummary {
        total_active: field("totalActive"),
        with_images: field("withImages"),
        with_card_layout: field("withCardLayout"),
        with_ordering: field("withOrdering"),
        with_byo: field("withByo"),
    }
}

/// Widget totals, plus current-vs-previous window trends when enabled.
///
/// # Errors
///
/// See [`normalize_widgets`]. With trends enabled, also returns
/// [`AnalyticsError::InvalidPeriod`] for a window that cannot be built.
pub fn dashboard_metrics(
    raw_widgets: &Value,
    options: &DashboardOptions,
) -> Result<DashboardMetrics, AnalyticsError> {
    let widgets = normalize_widgets(raw_widgets)?;

    let trends = if options.include_trends {
        let (current_period, previous_period) = options.periods()?;
        let current = WindowTotals::collect(&widgets, &current_period);
        let previous = WindowTotals::collect(&widgets, &previous_period);
        Some(DashboardTrends {
            period_days: options.trend_days,
            total: trend(current.created, previous.created),
            active: trend(current.activated, previous.activated),
            locations: trend(current.locations, previous.locations),
        })
    } else {
        None
    };

    Ok(DashboardMetrics {
        total_widgets: widgets.len(),
        active_widgets: widgets.iter().filter(|w| w.is_active()).count(),
        total_locations: widgets.iter().map(|w| w.number_of_locations).sum(),
        trends,
    })
}

/// Feature usage as percentages of the active-widget count.
///
/// # Errors
///
/// See [`normalize_widgets`].
pub fn dashboard_analytics(
    raw_widgets: &Value,
    analytics: &AnalyticsSummary,
) -> Result<DashboardAnalytics, AnalyticsError> {
    let widgets = normalize_widgets(raw_widgets)?;
    Ok(DashboardAnalytics {
        total_widgets: widgets.len(),
        total_active: analytics.total_active,
        features: feature_usage(analytics),
    })
}

/// Activation rate, average locations per menu, and feature usage.
///
/// # Errors
///
/// See [`normalize_widgets`].
pub fn dashboard_summary(
    raw_widgets: &Value,
    analytics: &AnalyticsSummary,
) -> Result<DashboardSummary, AnalyticsError> {
    let widgets = normalize_widgets(raw_widgets)?;
    let active = widgets.iter().filter(|w| w.is_active()).count();
    let total_locations: f64 = widgets.iter().map(|w| w.number_of_locations).sum();
    #[allow(clippy::cast_precision_loss)]
    let (total_f, active_f) = (widgets.len() as f64, active as f64);

    Ok(DashboardSummary {
        total_widgets: widgets.len(),
        active_widgets: active,
        total_locations,
        activation_rate: share_percent(active_f, total_f),
        average_locations_per_menu: round_to_tenth(total_locations / total_f),
        features: feature_usage(analytics),
    })
}

/// Creation growth, activation trend and location growth between the
/// current window and the one before it.
///
/// # Errors
///
/// See [`normalize_widgets`]. Also returns [`AnalyticsError::InvalidPeriod`]
/// for a window that cannot be built.
pub fn dashboard_performance(
    raw_widgets: &Value,
    analytics: &AnalyticsSummary,
    options: &DashboardOptions,
) -> Result<DashboardPerformance, AnalyticsError> {
    let widgets = normalize_widgets(raw_widgets)?;
    let (current_period, previous_period) = options.periods()?;
    let current = WindowTotals::collect(&widgets, &current_period);
    let previous = WindowTotals::collect(&widgets, &previous_period);

    Ok(DashboardPerformance {
        period_days: options.trend_days,
        growth_rate: round_to_tenth(growth_percent(current.created, previous.created)),
        activation_trend: percent_change(current.activated, previous.activated),
        location_growth: round_to_tenth(growth_percent(current.locations, previous.locations)),
        feature_adoption: feature_usage(analytics),
    })
}

/// Per-window counts used by the trend and performance aggregates.
struct WindowTotals {
    created: f64,
    activated: f64,
    locations: f64,
}

impl WindowTotals {
    #[allow(clippy::cast_precision_loss)]
    fn collect(widgets: &[SmartMenuWidget], period: &TimePeriod) -> Self {
        let created = filter_by_period(widgets, period, DateField::CreatedAt);
        let activated = filter_by_period(widgets, period, DateField::PublishedAt);
        Self {
            created: created.len() as f64,
            activated: activated.len() as f64,
            locations: created.iter().map(|w| w.number_of_locations).sum(),
        }
    }
}

fn trend(current: f64, previous: f64) -> TrendMetric {
    TrendMetric {
        growth: growth_metrics(current, previous),
        change: percent_change(current, previous),
    }
}

fn feature_usage(analytics: &AnalyticsSummary) -> FeatureUsage {
    let total = analytics.total_active;
    FeatureUsage {
        images: share_percent(analytics.with_images, total),
        card_layout: share_percent(analytics.with_card_layout, total),
        ordering: share_percent(analytics.with_ordering, total),
        byo: share_percent(analytics.with_byo, total),
    }
}

/// `part` as a percentage of `whole`, to one decimal; `0` when `whole` is not positive.
fn share_percent(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    round_to_tenth(part / whole * 100.0)
}

fn round_to_tenth(value: f64) -> f64 {
    if value.is_finite() {
        (value * 10.0).round() / 10.0
    } else {
        0.0
    }
}
