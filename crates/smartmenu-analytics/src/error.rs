use thiserror::Error;

/// Failures from engine operations that need a minimum amount of usable
/// input. The message is what a dashboard shows in place of the number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    #[error("no quarterly data available")]
    EmptyInput,

    #[error("insufficient data for {operation}: need at least {required} quarters, got {actual}")]
    InsufficientData {
        operation: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("{what} must be an array")]
    NotAnArray { what: &'static str },

    #[error("no valid widgets found (each widget needs a string id and createdAt)")]
    NoValidWidgets,

    #[error("invalid trend window of {days} days")]
    InvalidPeriod { days: i64 },
}
