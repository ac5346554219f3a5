#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for the command-line surface around the engine.
///
/// The engine itself reads no configuration; these values are passed into
/// it as plain arguments by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub env: Environment,
    /// `tracing` filter directive, e.g. `"info"` or `"smartmenu_analytics=debug"`.
    pub log_level: String,
    /// Length in days of the current and previous dashboard trend windows.
    pub trend_window_days: i64,
    pub include_trends: bool,
    /// Default horizon for CAGR output.
    pub cagr_years: f64,
}
