//! SmartMenu widget records as consumed by the dashboard aggregators.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A widget record that passed the validity filter (string `id` and
/// string `createdAt`).
///
/// Timestamps are kept as the strings upstream sent; [`Self::created_at_utc`]
/// and [`Self::published_at_utc`] parse them on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartMenuWidget {
    pub id: String,
    pub created_at: String,
    /// Present and non-empty only for published (active) widgets.
    pub published_at: Option<String>,
    pub number_of_locations: f64,
}

impl SmartMenuWidget {
    /// A widget counts as active once it has been published.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.published_at.is_some()
    }

    #[must_use]
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    #[must_use]
    pub fn published_at_utc(&self) -> Option<DateTime<Utc>> {
        self.published_at.as_deref().and_then(parse_timestamp)
    }
}

/// Parses an RFC 3339 timestamp, or a bare `YYYY-MM-DD` date as midnight UTC.
///
/// Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Feature-usage counts supplied alongside the widget list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_active: f64,
    pub with_images: f64,
    pub with_card_layout: f64,
    pub with_ordering: f64,
    pub with_byo: f64,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn make_widget(published_at: Option<&str>) -> SmartMenuWidget {
        SmartMenuWidget {
            id: "w-1".to_string(),
            created_at: "2025-06-01T12:00:00Z".to_string(),
            published_at: published_at.map(str::to_string),
            number_of_locations: 3.0,
        }
    }

    #[test]
    fn published_widget_is_active() {
        assert!(make_widget(Some("2025-06-02T00:00:00Z")).is_active());
        assert!(!make_widget(None).is_active());
    }

    #[test]
    fn parse_timestamp_accepts_rfc3339_with_offset() {
        let ts = parse_timestamp("2025-06-01T14:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn parse_timestamp_accepts_bare_date() {
        let ts = parse_timestamp("2025-06-01").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("last tuesday").is_none());
        assert!(make_widget(Some("soon")).published_at_utc().is_none());
    }
}
