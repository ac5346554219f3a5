//! Growth primitives shared by the quarterly calculators and the dashboard
//! aggregators.
//!
//! Every delta against a zero baseline follows the same rule: growth from
//! nothing to something is `+100%`, and nothing to nothing is `0%`.

use crate::types::GrowthMetrics;

/// Formats a percentage with one decimal and an explicit `+` when non-negative.
///
/// Non-finite input formats as `"0%"`.
#[must_use]
pub fn format_signed_percent(value: f64) -> String {
    if !value.is_finite() {
        return "0%".to_string();
    }
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{value:.1}%")
}

/// Percentage change from `previous` to `current` as a raw number.
#[must_use]
pub fn growth_percent(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    let change = (current - previous) / previous * 100.0;
    if change.is_finite() {
        change
    } else {
        0.0
    }
}

/// Percentage change from `previous` to `current`, formatted for display.
///
/// `percent_change(120.0, 100.0) == "+20.0%"`; a zero baseline yields
/// `"+100%"` or `"0%"` without a decimal.
#[must_use]
pub fn percent_change(current: f64, previous: f64) -> String {
    if previous == 0.0 {
        return if current > 0.0 { "+100%" } else { "0%" }.to_string();
    }
    format_signed_percent(growth_percent(current, previous))
}

/// Raw comparison of `current` against `previous`.
///
/// `is_positive` holds when `growth >= 0`, so an unchanged value counts as
/// positive. `growth_percent` uses the zero-baseline rule of [`growth_percent`].
#[must_use]
pub fn growth_metrics(current: f64, previous: f64) -> GrowthMetrics {
    let growth = current - previous;
    GrowthMetrics {
        current,
        previous,
        growth,
        growth_percent: growth_percent(current, previous),
        is_positive: growth >= 0.0,
    }
}
