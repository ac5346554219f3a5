//! Time windows for dashboard trend comparisons.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use smartmenu_core::SmartMenuWidget;

use crate::error::AnalyticsError;

/// A half-open window `(start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimePeriod {
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The `days` days ending at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidPeriod`] when `days` is not positive
    /// or the window start falls outside the representable date range.
    pub fn trailing(now: DateTime<Utc>, days: i64) -> Result<Self, AnalyticsError> {
        let invalid = || AnalyticsError::InvalidPeriod { days };
        if days <= 0 {
            return Err(invalid());
        }
        let length = Duration::try_days(days).ok_or_else(invalid)?;
        let start = now.checked_sub_signed(length).ok_or_else(invalid)?;
        Ok(Self { start, end: now })
    }

    /// The window of equal length immediately before this one, or `None`
    /// when it would start before the earliest representable instant.
    #[must_use]
    pub fn preceding(&self) -> Option<Self> {
        let length = self.end - self.start;
        Some(Self {
            start: self.start.checked_sub_signed(length)?,
            end: self.start,
        })
    }

    /// `true` when `ts` is strictly after `start` and at or before `end`.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts > self.start && ts <= self.end
    }
}

/// Which widget timestamp a period filter looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    CreatedAt,
    PublishedAt,
}

impl DateField {
    fn read(self, widget: &SmartMenuWidget) -> Option<DateTime<Utc>> {
        match self {
            DateField::CreatedAt => widget.created_at_utc(),
            DateField::PublishedAt => widget.published_at_utc(),
        }
    }
}

/// Widgets whose `field` falls inside `period`. Widgets without a parseable
/// value for `field` are never included.
#[must_use]
pub fn filter_by_period<'a>(
    widgets: &'a [SmartMenuWidget],
    period: &TimePeriod,
    field: DateField,
) -> Vec<&'a SmartMenuWidget> {
    widgets
        .iter()
        .filter(|w| field.read(w).is_some_and(|ts| period.contains(ts)))
        .collect()
}
