//! Shared record shapes and configuration for the SmartMenu analytics engine.

pub mod app_config;
pub mod config;
pub mod quarterly;
pub mod widgets;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, MAX_TREND_WINDOW_DAYS};
pub use quarterly::{
    CountMetric, MetricKey, QuarterlyMetricInput, QuarterlyMetricOutput, RevenueMetric,
    UnknownMetricKey, UNKNOWN_QUARTER,
};
pub use widgets::{parse_timestamp, AnalyticsSummary, SmartMenuWidget};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
