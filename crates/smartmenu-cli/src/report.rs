//! Subcommand handlers.
//!
//! Each handler takes already-parsed JSON and returns the envelope printed on
//! stdout: `{"success": true, "data": ...}` or `{"success": false, "error": ...}`.
//! Only reading and serializing can fail with an `anyhow` error; engine
//! failures become the `error` envelope.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde_json::{json, Value};
use smartmenu_analytics::{
    analytics_summary_from_value, cagr, dashboard_analytics, dashboard_metrics,
    dashboard_performance, dashboard_summary, metric_growth_rate, normalize_quarterly_metrics,
    orders_delta, summary_statistics, trend_direction, validate_quarter_order,
    validate_quarterly_metrics, validate_quarterly_metrics_detailed, yoy_growth, AnalyticsError,
    DashboardAnalytics, DashboardMetrics, DashboardOptions, DashboardPerformance, DashboardSummary,
    MetricGrowth, SummaryStatistics, TrendDirection,
};
use smartmenu_core::{AnalyticsSummary, MetricKey};

/// Reads a JSON document from `path`, or from stdin when `path` is `-`.
pub(crate) fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

pub(crate) fn envelope<T: Serialize>(result: Result<T, AnalyticsError>) -> anyhow::Result<Value> {
    match result {
        Ok(data) => Ok(json!({
            "success": true,
            "data": serde_json::to_value(data).context("failed to serialize result")?,
        })),
        Err(err) => {
            tracing::debug!(error = %err, "analytics operation failed");
            Ok(json!({ "success": false, "error": err.to_string() }))
        }
    }
}

pub(crate) fn is_success(envelope: &Value) -> bool {
    envelope.get("success").and_then(Value::as_bool) == Some(true)
}

pub(crate) fn normalize(raw: &Value) -> anyhow::Result<Value> {
    envelope(Ok(normalize_quarterly_metrics(Some(raw))))
}

pub(crate) fn validate(raw: &Value, detailed: bool) -> anyhow::Result<Value> {
    if detailed {
        envelope(Ok(validate_quarterly_metrics_detailed(raw)))
    } else {
        envelope(Ok(validate_quarterly_metrics(raw)))
    }
}

pub(crate) fn check_order(raw: &Value) -> anyhow::Result<Value> {
    let data = normalize_quarterly_metrics(Some(raw));
    envelope(Ok(validate_quarter_order(&data)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryReport {
    #[serde(flatten)]
    statistics: SummaryStatistics,
    orders_delta: String,
    /// Omitted with fewer than five quarters.
    #[serde(skip_serializing_if = "Option::is_none")]
    yoy_growth: Option<MetricGrowth>,
}

pub(crate) fn summary(raw: &Value) -> anyhow::Result<Value> {
    let data = normalize_quarterly_metrics(Some(raw));
    envelope(summary_statistics(&data).map(|statistics| SummaryReport {
        statistics,
        orders_delta: orders_delta(&data),
        yoy_growth: yoy_growth(&data).ok(),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GrowthReport {
    metric: MetricKey,
    latest_quarter: String,
    growth_rate: f64,
    cagr: f64,
    years: f64,
    trend: TrendDirection,
}

pub(crate) fn growth(raw: &Value, metric: MetricKey, years: f64) -> anyhow::Result<Value> {
    let data = normalize_quarterly_metrics(Some(raw));
    let report = match data.first() {
        None => Err(AnalyticsError::EmptyInput),
        Some(latest) => Ok(GrowthReport {
            metric,
            latest_quarter: latest.quarter.clone(),
            growth_rate: metric_growth_rate(&data, metric),
            cagr: cagr(&data, metric, years),
            years,
            trend: trend_direction(&data, metric),
        }),
    };
    envelope(report)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardReport {
    metrics: DashboardMetrics,
    analytics: DashboardAnalytics,
    summary: DashboardSummary,
    performance: DashboardPerformance,
}

pub(crate) fn dashboard(
    widgets: &Value,
    analytics: Option<&Value>,
    options: &DashboardOptions,
) -> anyhow::Result<Value> {
    let counts = analytics.map_or_else(AnalyticsSummary::default, analytics_summary_from_value);
    let build = || -> Result<DashboardReport, AnalyticsError> {
        Ok(DashboardReport {
            metrics: dashboard_metrics(widgets, options)?,
            analytics: dashboard_analytics(widgets, &counts)?,
            summary: dashboard_summary(widgets, &counts)?,
            performance: dashboard_performance(widgets, &counts, options)?,
        })
    };
    envelope(build())
}
