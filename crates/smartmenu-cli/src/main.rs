use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use smartmenu_analytics::DashboardOptions;
use smartmenu_core::{AppConfig, MetricKey};
use tracing_subscriber::EnvFilter;

mod report;

#[derive(Debug, Parser)]
#[command(name = "smartmenu")]
#[command(about = "SmartMenu quarterly and dashboard analytics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize raw quarterly records
    Normalize {
        /// JSON file with an array of quarterly records (`-` for stdin)
        input: PathBuf,
    },
    /// Validate raw quarterly records
    Validate {
        /// JSON file with an array of quarterly records (`-` for stdin)
        input: PathBuf,
        /// Include warnings and per-field errors
        #[arg(long)]
        detailed: bool,
    },
    /// Check that quarters are in descending chronological order
    CheckOrder {
        /// JSON file with an array of quarterly records (`-` for stdin)
        input: PathBuf,
    },
    /// Totals, growth and trends for a set of quarters
    Summary {
        /// JSON file with an array of quarterly records (`-` for stdin)
        input: PathBuf,
    },
    /// Growth rate, CAGR and trend for one metric
    Growth {
        /// JSON file with an array of quarterly records (`-` for stdin)
        input: PathBuf,
        /// brands, locations, activeSmartMenus or orders
        #[arg(long)]
        metric: MetricKey,
        /// Years spanned by the data, for CAGR (defaults to SMARTMENU_CAGR_YEARS)
        #[arg(long)]
        years: Option<f64>,
    },
    /// Dashboard metrics, analytics, summary and performance for widgets
    Dashboard {
        /// JSON file with an array of widget records (`-` for stdin)
        #[arg(long)]
        widgets: PathBuf,
        /// JSON file with feature-usage counts
        #[arg(long)]
        analytics: Option<PathBuf>,
        /// Reference instant for trend windows (RFC 3339, defaults to now)
        #[arg(long)]
        now: Option<DateTime<Utc>>,
        /// Trend window length in days (defaults to SMARTMENU_TREND_WINDOW_DAYS)
        #[arg(long)]
        days: Option<i64>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    // Parse first so `--help` and usage errors never depend on the environment.
    let cli = Cli::parse();
    let config = smartmenu_core::load_app_config()?;
    init_tracing(&config.log_level)?;
    tracing::debug!(env = %config.env, "configuration loaded");

    let envelope = run(cli.command, &config)?;
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(if report::is_success(&envelope) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run(command: Commands, config: &AppConfig) -> anyhow::Result<serde_json::Value> {
    match command {
        Commands::Normalize { input } => report::normalize(&report::read_json(&input)?),
        Commands::Validate { input, detailed } => {
            report::validate(&report::read_json(&input)?, detailed)
        }
        Commands::CheckOrder { input } => report::check_order(&report::read_json(&input)?),
        Commands::Summary { input } => report::summary(&report::read_json(&input)?),
        Commands::Growth {
            input,
            metric,
            years,
        } => report::growth(
            &report::read_json(&input)?,
            metric,
            years.unwrap_or(config.cagr_years),
        ),
        Commands::Dashboard {
            widgets,
            analytics,
            now,
            days,
        } => {
            let widgets = report::read_json(&widgets)?;
            let analytics = analytics.map(|path| report::read_json(&path)).transpose()?;
            let options = DashboardOptions::new(now.unwrap_or_else(Utc::now))
                .with_trend_days(days.unwrap_or(config.trend_window_days))
                .with_trends(config.include_trends);
            report::dashboard(&widgets, analytics.as_ref(), &options)
        }
    }
}

/// Logs go to stderr so stdout stays a single JSON document.
///
/// `SMARTMENU_LOG_LEVEL` wins over `RUST_LOG`; `default_level` applies when
/// neither is set.
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_env("SMARTMENU_LOG_LEVEL")
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests;
