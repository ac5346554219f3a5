//! Calculators over normalized quarters.
//!
//! Slices are ordered newest-first: index 0 is the most recent quarter.

use smartmenu_core::{MetricKey, QuarterlyMetricOutput};

use crate::error::AnalyticsError;
use crate::growth::{format_signed_percent, growth_percent};
use crate::types::{MetricGrowth, PerMetric, SummaryStatistics, TrendDirection};

/// Slopes smaller than this in magnitude classify as [`TrendDirection::Stable`].
pub const STABLE_SLOPE_THRESHOLD: f64 = 0.01;

/// Number of recent quarters the trend line is fitted over.
pub const TREND_WINDOW: usize = 3;

/// Quarters back that a year-over-year comparison reaches.
pub const YOY_LAG: usize = 4;

fn sum_by(data: &[QuarterlyMetricOutput], f: impl Fn(&QuarterlyMetricOutput) -> f64) -> f64 {
    data.iter().map(f).sum()
}

#[must_use]
pub fn total_orders(data: &[QuarterlyMetricOutput]) -> f64 {
    sum_by(data, |q| q.orders)
}

#[must_use]
pub fn total_brands(data: &[QuarterlyMetricOutput]) -> f64 {
    sum_by(data, |q| q.brands)
}

#[must_use]
pub fn total_locations(data: &[QuarterlyMetricOutput]) -> f64 {
    sum_by(data, |q| q.locations)
}

#[must_use]
pub fn total_active_smart_menus(data: &[QuarterlyMetricOutput]) -> f64 {
    sum_by(data, |q| q.active_smart_menus)
}

/// Mean orders per quarter; `0.0` for no quarters.
#[must_use]
pub fn average_orders_per_quarter(data: &[QuarterlyMetricOutput]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = data.len() as f64;
    total_orders(data) / count
}

/// Display delta for the headline orders figure.
///
/// Uses the newest quarter's precomputed `ordersQoQGrowth` instead of
/// recomputing it from the previous quarter's order count. The two can
/// disagree when upstream data is inconsistent; the upstream figure wins.
#[must_use]
pub fn orders_delta(data: &[QuarterlyMetricOutput]) -> String {
    let Some(current) = data.first() else {
        return "0%".to_string();
    };
    if current.orders == 0.0 {
        return "0%".to_string();
    }

    let has_baseline = data.get(1).is_some_and(|previous| previous.orders != 0.0);
    if !has_baseline {
        tracing::debug!(
            quarter = %current.quarter,
            "no previous order count; using precomputed growth"
        );
    }
    format_signed_percent(current.orders_qoq_growth)
}

/// Percentage change of `key` between the two most recent quarters.
///
/// Returns `0.0` with fewer than two quarters.
#[must_use]
pub fn metric_growth_rate(data: &[QuarterlyMetricOutput], key: MetricKey) -> f64 {
    match data {
        [current, previous, ..] => growth_percent(current.metric(key), previous.metric(key)),
        _ => 0.0,
    }
}

/// Compound annual growth rate of `key`, as a percentage.
///
/// The oldest quarter (last in the slice) is the base and the newest
/// (`data[0]`) is the end value. Returns `0.0` for no data, a non-positive
/// `years`, a zero base, or a ratio with no real root.
#[must_use]
pub fn cagr(data: &[QuarterlyMetricOutput], key: MetricKey, years: f64) -> f64 {
    let (Some(newest), Some(oldest)) = (data.first(), data.last()) else {
        return 0.0;
    };
    if years <= 0.0 || !years.is_finite() {
        return 0.0;
    }
    let base = oldest.metric(key);
    if base == 0.0 {
        return 0.0;
    }

    let rate = ((newest.metric(key) / base).powf(1.0 / years) - 1.0) * 100.0;
    if rate.is_finite() {
        rate
    } else {
        0.0
    }
}

/// Classifies the direction of `key` over the most recent quarters.
///
/// Fits an ordinary least-squares line through up to [`TREND_WINDOW`]
/// quarters, regressing `data[i]` on `x = i` in the slice's newest-first
/// order. The sign of that slope picks the direction, so a metric that has
/// been rising toward the latest quarter classifies as `Decreasing`.
#[must_use]
pub fn trend_direction(data: &[QuarterlyMetricOutput], key: MetricKey) -> TrendDirection {
    let recent = &data[..data.len().min(TREND_WINDOW)];
    if recent.len() < 2 {
        return TrendDirection::Stable;
    }

    let values: Vec<f64> = recent.iter().map(|q| q.metric(key)).collect();
    let slope = least_squares_slope(&values);

    if slope.abs() < STABLE_SLOPE_THRESHOLD {
        TrendDirection::Stable
    } else if slope > 0.0 {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    }
}

/// Slope of `values` regressed on their indices `0..n`.
#[allow(clippy::cast_precision_loss)]
fn least_squares_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return 0.0;
    }
    (n * sum_xy - sum_x * sum_y) / denominator
}

fn growth_against(
    data: &[QuarterlyMetricOutput],
    lag: usize,
    operation: &'static str,
) -> Result<MetricGrowth, AnalyticsError> {
    let (Some(current), Some(previous)) = (data.first(), data.get(lag)) else {
        tracing::debug!(operation, quarters = data.len(), "not enough quarters");
        return Err(AnalyticsError::InsufficientData {
            operation,
            required: lag + 1,
            actual: data.len(),
        });
    };
    Ok(PerMetric::from_fn(|key| {
        growth_percent(current.metric(key), previous.metric(key))
    }))
}

/// Quarter-over-quarter growth for every count metric.
///
/// # Errors
///
/// Returns [`AnalyticsError::InsufficientData`] with fewer than two quarters.
pub fn qoq_growth(data: &[QuarterlyMetricOutput]) -> Result<MetricGrowth, AnalyticsError> {
    growth_against(data, 1, "quarter-over-quarter growth")
}

/// Year-over-year growth for every count metric, comparing the newest
/// quarter with the one [`YOY_LAG`] quarters earlier.
///
/// # Errors
///
/// Returns [`AnalyticsError::InsufficientData`] when that earlier quarter is
/// not present, i.e. with fewer than five quarters.
pub fn yoy_growth(data: &[QuarterlyMetricOutput]) -> Result<MetricGrowth, AnalyticsError> {
    growth_against(data, YOY_LAG, "year-over-year growth")
}

/// Totals, average, QoQ growth and per-metric trends in one pass.
///
/// # Errors
///
/// Returns [`AnalyticsError::EmptyInput`] for an empty slice, so that "no
/// data" is never confused with genuinely zero metrics.
pub fn summary_statistics(
    data: &[QuarterlyMetricOutput],
) -> Result<SummaryStatistics, AnalyticsError> {
    let Some(latest) = data.first() else {
        return Err(AnalyticsError::EmptyInput);
    };

    Ok(SummaryStatistics {
        quarter_count: data.len(),
        latest_quarter: latest.quarter.clone(),
        total_orders: total_orders(data),
        total_brands: total_brands(data),
        total_locations: total_locations(data),
        total_active_smart_menus: total_active_smart_menus(data),
        average_orders_per_quarter: average_orders_per_quarter(data),
        qoq_growth: qoq_growth(data).ok(),
        trends: PerMetric::from_fn(|key| trend_direction(data, key)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quarter(label: &str, orders: f64, qoq_percent: f64) -> QuarterlyMetricOutput {
        QuarterlyMetricOutput {
            quarter: label.to_string(),
            orders,
            orders_qoq_growth: qoq_percent,
            ..QuarterlyMetricOutput::default()
        }
    }

    fn series(label_prefix: &str, orders: &[f64]) -> Vec<QuarterlyMetricOutput> {
        orders
            .iter()
            .enumerate()
            .map(|(i, &o)| quarter(&format!("{label_prefix}{i}"), o, 0.0))
            .collect()
    }

    #[test]
    fn totals_sum_each_field() {
        let data = vec![
            QuarterlyMetricOutput {
                brands: 3.0,
                locations: 30.0,
                active_smart_menus: 5.0,
                orders: 1000.0,
                ..QuarterlyMetricOutput::default()
            },
            QuarterlyMetricOutput {
                brands: 2.0,
                locations: 20.0,
                active_smart_menus: 4.0,
                orders: 800.0,
                ..QuarterlyMetricOutput::default()
            },
        ];
        assert_eq!(total_orders(&data), 1800.0);
        assert_eq!(total_brands(&data), 5.0);
        assert_eq!(total_locations(&data), 50.0);
        assert_eq!(total_active_smart_menus(&data), 9.0);
        assert_eq!(average_orders_per_quarter(&data), 900.0);
    }

    #[test]
    fn totals_of_nothing_are_zero() {
        assert_eq!(total_orders(&[]), 0.0);
        assert_eq!(average_orders_per_quarter(&[]), 0.0);
    }

    #[test]
    fn orders_delta_trusts_precomputed_growth() {
        // Raw counts would give +25.0%; the upstream field says +10%.
        let data = vec![quarter("Q3 2025", 1000.0, 10.0), quarter("Q2 2025", 800.0, 20.0)];
        assert_eq!(orders_delta(&data), "+10.0%");
    }

    #[test]
    fn orders_delta_without_baseline_uses_precomputed_growth() {
        assert_eq!(orders_delta(&[quarter("Q3 2025", 1000.0, -7.5)]), "-7.5%");
        let data = vec![quarter("Q3 2025", 1000.0, 12.0), quarter("Q2 2025", 0.0, 0.0)];
        assert_eq!(orders_delta(&data), "+12.0%");
    }

    #[test]
    fn orders_delta_zero_cases() {
        assert_eq!(orders_delta(&[]), "0%");
        assert_eq!(orders_delta(&[quarter("Q3 2025", 0.0, 50.0)]), "0%");
    }

    #[test]
    fn metric_growth_rate_compares_two_newest() {
        let data = series("q", &[120.0, 100.0, 10.0]);
        assert!((metric_growth_rate(&data, MetricKey::Orders) - 20.0).abs() < 1e-9);
        assert_eq!(metric_growth_rate(&data[..1], MetricKey::Orders), 0.0);
        let from_zero = series("q", &[5.0, 0.0]);
        assert_eq!(metric_growth_rate(&from_zero, MetricKey::Orders), 100.0);
    }

    #[test]
    fn cagr_uses_oldest_quarter_as_base() {
        // Newest 121, oldest 100 over two years: sqrt(1.21) - 1 = 10%.
        let data = series("q", &[121.0, 110.0, 100.0]);
        assert!((cagr(&data, MetricKey::Orders, 2.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn cagr_two_point_series_pins_direction() {
        let data = series("q", &[150.0, 100.0]);
        assert!((cagr(&data, MetricKey::Orders, 1.0) - 50.0).abs() < 1e-9);
        let shrinking = series("q", &[100.0, 200.0]);
        assert!((cagr(&shrinking, MetricKey::Orders, 1.0) + 50.0).abs() < 1e-9);
    }

    #[test]
    fn cagr_degenerate_inputs_are_zero() {
        assert_eq!(cagr(&[], MetricKey::Orders, 1.0), 0.0);
        let data = series("q", &[150.0, 100.0]);
        assert_eq!(cagr(&data, MetricKey::Orders, 0.0), 0.0);
        assert_eq!(cagr(&data, MetricKey::Orders, -1.0), 0.0);
        assert_eq!(cagr(&series("q", &[150.0, 0.0]), MetricKey::Orders, 1.0), 0.0);
        assert_eq!(cagr(&series("q", &[-8.0, 2.0]), MetricKey::Orders, 2.0), 0.0);
    }

    #[test]
    fn trend_direction_fits_values_against_slice_index() {
        // x = 0, 1, 2 over [300, 200, 100] gives slope -100.
        let falling_by_index = series("q", &[300.0, 200.0, 100.0]);
        assert_eq!(
            trend_direction(&falling_by_index, MetricKey::Orders),
            TrendDirection::Decreasing
        );
        let rising_by_index = series("q", &[100.0, 200.0, 300.0]);
        assert_eq!(
            trend_direction(&rising_by_index, MetricKey::Orders),
            TrendDirection::Increasing
        );
    }

    #[test]
    fn trend_direction_only_looks_at_three_newest() {
        let data = series("q", &[300.0, 200.0, 100.0, 5000.0, 9000.0]);
        assert_eq!(
            trend_direction(&data, MetricKey::Orders),
            TrendDirection::Decreasing
        );
    }

    #[test]
    fn trend_direction_small_slope_is_stable() {
        let data = series("q", &[100.005, 100.0, 100.0]);
        assert_eq!(
            trend_direction(&data, MetricKey::Orders),
            TrendDirection::Stable
        );
        assert_eq!(
            trend_direction(&data[..1], MetricKey::Orders),
            TrendDirection::Stable
        );
    }

    #[test]
    fn qoq_growth_needs_two_quarters() {
        let err = qoq_growth(&series("q", &[1.0])).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::InsufficientData {
                operation: "quarter-over-quarter growth",
                required: 2,
                actual: 1,
            }
        );
        let growth = qoq_growth(&series("q", &[150.0, 100.0])).unwrap();
        assert!((growth.orders - 50.0).abs() < 1e-9);
        assert_eq!(growth.brands, 0.0);
    }

    #[test]
    fn yoy_growth_compares_four_quarters_back() {
        let err = yoy_growth(&series("q", &[1.0, 2.0, 3.0])).unwrap_err();
        assert!(matches!(err, AnalyticsError::InsufficientData { actual: 3, .. }));
        assert!(yoy_growth(&series("q", &[1.0, 2.0, 3.0, 4.0])).is_err());

        let data = series("q", &[200.0, 1.0, 1.0, 1.0, 100.0]);
        let growth = yoy_growth(&data).unwrap();
        assert!((growth.get(MetricKey::Orders) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn summary_statistics_rejects_empty_input() {
        assert_eq!(summary_statistics(&[]).unwrap_err(), AnalyticsError::EmptyInput);
    }

    #[test]
    fn summary_statistics_single_quarter_has_no_qoq() {
        let stats = summary_statistics(&[quarter("Q1 2025", 0.0, 0.0)]).unwrap();
        assert_eq!(stats.quarter_count, 1);
        assert_eq!(stats.total_orders, 0.0);
        assert!(stats.qoq_growth.is_none());
        assert_eq!(stats.trends.orders, TrendDirection::Stable);
    }

    #[test]
    fn summary_statistics_combines_everything() {
        let data = vec![
            quarter("Q3 2025", 1000.0, 25.0),
            quarter("Q2 2025", 800.0, 20.0),
            quarter("Q1 2025", 600.0, 0.0),
        ];
        let stats = summary_statistics(&data).unwrap();
        assert_eq!(stats.latest_quarter, "Q3 2025");
        assert_eq!(stats.total_orders, 2400.0);
        assert_eq!(stats.average_orders_per_quarter, 800.0);
        let qoq = stats.qoq_growth.unwrap();
        assert!((qoq.orders - 25.0).abs() < 1e-9);
        assert_eq!(stats.trends.orders, TrendDirection::Decreasing);
        assert_eq!(stats.trends.brands, TrendDirection::Stable);
    }
}
