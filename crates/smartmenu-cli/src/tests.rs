use chrono::TimeZone;
use serde_json::json;

use super::*;
use crate::report;

fn two_quarters() -> serde_json::Value {
    json!([
        {"quarterLabel": "Q3 2025", "orders": {"count": 1000, "qoqGrowthPercent": 25}},
        {"quarterLabel": "Q2 2025", "orders": {"count": 800, "qoqGrowthPercent": 20}}
    ])
}

#[test]
fn parses_validate_with_detailed_flag() {
    let cli = Cli::try_parse_from(["smartmenu", "validate", "q.json", "--detailed"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Validate { detailed: true, .. }
    ));
}

#[test]
fn parses_growth_metric_and_years() {
    let cli = Cli::try_parse_from([
        "smartmenu",
        "growth",
        "q.json",
        "--metric",
        "activeSmartMenus",
        "--years",
        "2.5",
    ])
    .expect("expected valid cli args");
    match cli.command {
        Commands::Growth { metric, years, .. } => {
            assert_eq!(metric, MetricKey::ActiveSmartMenus);
            assert_eq!(years, Some(2.5));
        }
        other => panic!("expected growth command, got {other:?}"),
    }
}

#[test]
fn rejects_unknown_growth_metric() {
    let result = Cli::try_parse_from(["smartmenu", "growth", "q.json", "--metric", "revenue"]);
    assert!(result.is_err());
}

#[test]
fn parses_dashboard_with_explicit_now() {
    let cli = Cli::try_parse_from([
        "smartmenu",
        "dashboard",
        "--widgets",
        "w.json",
        "--now",
        "2025-07-01T00:00:00Z",
    ])
    .expect("expected valid cli args");
    match cli.command {
        Commands::Dashboard {
            analytics, now, days, ..
        } => {
            assert!(analytics.is_none());
            assert_eq!(now, Some(Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap()));
            assert!(days.is_none());
        }
        other => panic!("expected dashboard command, got {other:?}"),
    }
}

#[test]
fn help_renders_from_arguments_alone() {
    let err = Cli::try_parse_from(["smartmenu", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn run_reports_bad_window_as_error_envelope() {
    let dir = std::env::temp_dir().join(format!("smartmenu-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let widgets = dir.join("widgets.json");
    std::fs::write(
        &widgets,
        r#"[{"id": "a", "createdAt": "2025-06-20T00:00:00Z"}]"#,
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "smartmenu",
        "dashboard",
        "--widgets",
        widgets.to_str().unwrap(),
        "--now",
        "2025-07-01T00:00:00Z",
        "--days",
        "1000000000",
    ])
    .expect("expected valid cli args");
    let config = AppConfig {
        env: smartmenu_core::Environment::Test,
        log_level: "info".to_string(),
        trend_window_days: 30,
        include_trends: true,
        cagr_years: 1.0,
    };

    let envelope = run(cli.command, &config).unwrap();
    std::fs::remove_dir_all(&dir).ok();
    assert!(!report::is_success(&envelope));
    assert_eq!(
        envelope["error"],
        json!("invalid trend window of 1000000000 days")
    );
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["smartmenu"]).is_err());
}

#[test]
fn summary_envelope_carries_statistics_and_delta() {
    let envelope = report::summary(&two_quarters()).unwrap();
    assert!(report::is_success(&envelope));
    assert_eq!(envelope["data"]["totalOrders"], json!(1800.0));
    assert_eq!(envelope["data"]["ordersDelta"], json!("+25.0%"));
    assert_eq!(envelope["data"]["latestQuarter"], json!("Q3 2025"));
    assert!(envelope["data"].get("yoyGrowth").is_none());
}

#[test]
fn summary_of_nothing_is_an_error_envelope() {
    let envelope = report::summary(&json!([])).unwrap();
    assert!(!report::is_success(&envelope));
    assert_eq!(envelope["error"], json!("no quarterly data available"));
}

#[test]
fn growth_envelope_reports_rate_and_cagr() {
    let envelope = report::growth(&two_quarters(), MetricKey::Orders, 1.0).unwrap();
    assert!(report::is_success(&envelope));
    assert_eq!(envelope["data"]["metric"], json!("orders"));
    assert_eq!(envelope["data"]["growthRate"], json!(25.0));
    assert_eq!(envelope["data"]["cagr"], json!(25.0));
    assert_eq!(envelope["data"]["trend"], json!("decreasing"));
}

#[test]
fn validate_envelope_is_successful_even_when_data_is_invalid() {
    let envelope = report::validate(&json!({"not": "an array"}), false).unwrap();
    assert!(report::is_success(&envelope));
    assert_eq!(envelope["data"]["isValid"], json!(false));
    assert_eq!(
        envelope["data"]["errors"],
        json!(["Quarterly metrics must be an array"])
    );
}

#[test]
fn check_order_flags_ascending_quarters() {
    let raw = json!([{"quarterLabel": "Q1 2025"}, {"quarterLabel": "Q2 2025"}]);
    let envelope = report::check_order(&raw).unwrap();
    assert_eq!(envelope["data"]["isValid"], json!(false));
}

#[test]
fn dashboard_envelope_contains_all_four_sections() {
    let widgets = json!([
        {"id": "a", "createdAt": "2025-06-20T00:00:00Z", "publishedAt": "2025-06-22T00:00:00Z", "numberOfLocations": 2}
    ]);
    let analytics = json!({"totalActive": 1, "withImages": 1});
    let now = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
    let options = DashboardOptions::new(now);

    let envelope = report::dashboard(&widgets, Some(&analytics), &options).unwrap();
    assert!(report::is_success(&envelope));
    let data = &envelope["data"];
    assert_eq!(data["metrics"]["totalWidgets"], json!(1));
    assert_eq!(data["analytics"]["features"]["images"], json!(100.0));
    assert_eq!(data["summary"]["activationRate"], json!(100.0));
    assert_eq!(data["performance"]["periodDays"], json!(30));
}

#[test]
fn dashboard_without_widgets_is_an_error_envelope() {
    let now = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
    let options = DashboardOptions::new(now);
    let envelope = report::dashboard(&json!([]), None, &options).unwrap();
    assert!(!report::is_success(&envelope));
    assert_eq!(
        envelope["error"],
        json!("no valid widgets found (each widget needs a string id and createdAt)")
    );
}
