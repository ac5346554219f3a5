use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Upper bound for `SMARTMENU_TREND_WINDOW_DAYS`, about a century.
pub const MAX_TREND_WINDOW_DAYS: i64 = 36_500;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("SMARTMENU_ENV", "development"))?;
    let log_level = or_default("SMARTMENU_LOG_LEVEL", "info");

    let trend_window_days = or_default("SMARTMENU_TREND_WINDOW_DAYS", "30")
        .parse::<i64>()
        .map_err(|e| invalid("SMARTMENU_TREND_WINDOW_DAYS", e.to_string()))?;
    if !(1..=MAX_TREND_WINDOW_DAYS).contains(&trend_window_days) {
        return Err(invalid(
            "SMARTMENU_TREND_WINDOW_DAYS",
            format!("must be between 1 and {MAX_TREND_WINDOW_DAYS}, got {trend_window_days}"),
        ));
    }

    let include_trends = parse_bool(&or_default("SMARTMENU_INCLUDE_TRENDS", "true"))
        .ok_or_else(|| invalid("SMARTMENU_INCLUDE_TRENDS", "expected true or false".into()))?;

    let cagr_years = or_default("SMARTMENU_CAGR_YEARS", "1")
        .parse::<f64>()
        .map_err(|e| invalid("SMARTMENU_CAGR_YEARS", e.to_string()))?;
    if !cagr_years.is_finite() || cagr_years <= 0.0 {
        return Err(invalid(
            "SMARTMENU_CAGR_YEARS",
            format!("must be a positive number, got {cagr_years}"),
        ));
    }

    Ok(AppConfig {
        env,
        log_level,
        trend_window_days,
        include_trends,
        cagr_years,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SMARTMENU_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
