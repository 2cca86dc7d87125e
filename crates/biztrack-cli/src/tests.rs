//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;
use std::path::{Path, PathBuf};

use biztrack_core::categorize::NaiveBayesClassifier;
use biztrack_core::config::AnalyticsConfig;
use biztrack_core::models::{InsightKind, SeasonalityMode};
use tempfile::TempDir;

use crate::commands::{self, truncate};

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn daily_csv(days: u32) -> String {
    let mut csv = String::from("description,amount,date\n");
    for day in 1..=days {
        csv.push_str(&format!("Sales,{},2024-01-{:02}\n", 900 + day * 5, day));
    }
    csv
}

const EXPENSES_JSON: &str = r#"[
    {"description": "Monthly office rent", "amount": 500.0, "date": "2024-01-01", "vendor": "Landlord"},
    {"description": "Facebook ads", "amount": 100.0, "date": "2024-01-02", "vendor": "Meta"},
    {"description": "Restock inventory", "amount": 100.0, "date": "2024-01-03", "vendor": "Wholesale Co"}
]"#;

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a much longer description", 10), "a much ...");
    assert_eq!(truncate("café crème brûlée", 8), "café ...");
}

#[test]
fn test_model_path_prefers_flag() {
    let path = commands::model_path(Some(Path::new("/tmp/custom.json")));
    assert_eq!(path, PathBuf::from("/tmp/custom.json"));
}

#[test]
fn test_load_history_without_file_is_empty() {
    assert!(commands::load_history(None).unwrap().is_empty());
}

#[test]
fn test_load_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "analytics.toml", "[insights]\nanomaly_threshold = 0.5\n");

    let config = commands::load_config(Some(&path)).unwrap();
    assert_eq!(config.insights.anomaly_threshold, 0.5);
    assert_eq!(config.forecast.default_days, 30);
}

#[test]
fn test_load_config_rejects_invalid() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "analytics.toml", "[insights]\nanomaly_threshold = 1.5\n");
    assert!(commands::load_config(Some(&path)).is_err());
}

// ========== Forecast Command Tests ==========

#[test]
fn test_run_forecast_from_csv() {
    let dir = TempDir::new().unwrap();
    let income = write_file(&dir, "income.csv", &daily_csv(28));

    let forecast =
        commands::run_forecast(&AnalyticsConfig::default(), Some(&income), None, Some(7)).unwrap();
    assert_eq!(forecast.income.predictions.len(), 7);
    assert_eq!(forecast.seasonality(), SeasonalityMode::Weekly);
    assert_eq!(forecast.expense.seasonality_mode, SeasonalityMode::None);
}

#[test]
fn test_run_forecast_uses_config_default_days() {
    let dir = TempDir::new().unwrap();
    let expense = write_file(&dir, "expense.csv", "amount,date\n40,2024-01-01\n");

    let forecast =
        commands::run_forecast(&AnalyticsConfig::default(), None, Some(&expense), None).unwrap();
    // One point: placeholder forecast over the default horizon
    assert_eq!(forecast.expense.predictions.len(), 30);
    assert_eq!(forecast.expense.seasonality_mode, SeasonalityMode::Fallback);
}

#[test]
fn test_run_forecast_rejects_zero_days() {
    let dir = TempDir::new().unwrap();
    let income = write_file(&dir, "income.csv", &daily_csv(5));
    assert!(commands::run_forecast(&AnalyticsConfig::default(), Some(&income), None, Some(0)).is_err());
}

#[test]
fn test_cmd_forecast_requires_a_file() {
    let result = commands::cmd_forecast(&AnalyticsConfig::default(), None, None, None, false);
    assert!(result.is_err());
}

#[test]
fn test_cmd_forecast_prints() {
    let dir = TempDir::new().unwrap();
    let income = write_file(&dir, "income.csv", &daily_csv(14));
    assert!(commands::cmd_forecast(&AnalyticsConfig::default(), Some(&income), None, Some(3), true).is_ok());
    assert!(commands::cmd_forecast(&AnalyticsConfig::default(), Some(&income), None, Some(3), false).is_ok());
}

// ========== Categorize Command Tests ==========

#[test]
fn test_run_categorize_heuristic_without_artifact() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("categorizer.json");

    let results = commands::run_categorize(
        &AnalyticsConfig::default(),
        &missing,
        vec!["Uber for business meeting".to_string(), "Mystery".to_string()],
        None,
    )
    .unwrap();

    assert_eq!(results[0].1.category, "transport");
    assert_eq!(results[1].1.category, "other");
    assert_eq!(results[1].1.confidence, 0.4);
}

#[test]
fn test_run_categorize_with_file_and_model() {
    let dir = TempDir::new().unwrap();
    let model = dir.path().join("categorizer.json");
    commands::train_categorizer(None, &model, 0.1).unwrap();
    let file = write_file(&dir, "expenses.json", EXPENSES_JSON);

    let results =
        commands::run_categorize(&AnalyticsConfig::default(), &model, Vec::new(), Some(&file)).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].0, "Monthly office rent");
    assert_eq!(results[0].1.category, "rent");
}

#[test]
fn test_run_categorize_requires_input() {
    let dir = TempDir::new().unwrap();
    let result = commands::run_categorize(
        &AnalyticsConfig::default(),
        &dir.path().join("none.json"),
        Vec::new(),
        None,
    );
    assert!(result.is_err());
}

// ========== Insights Command Tests ==========

#[test]
fn test_run_insights_by_description() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "expenses.json", EXPENSES_JSON);

    let insights = commands::run_insights(
        &AnalyticsConfig::default(),
        &dir.path().join("none.json"),
        &file,
        None,
    )
    .unwrap();
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].kind, InsightKind::Anomaly);
    assert_eq!(insights[0].category.as_deref(), Some("Monthly office rent"));
}

#[test]
fn test_run_insights_group_by_override() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "expenses.json", EXPENSES_JSON);
    let model = dir.path().join("none.json");

    let insights =
        commands::run_insights(&AnalyticsConfig::default(), &model, &file, Some("vendor")).unwrap();
    assert_eq!(insights[0].category.as_deref(), Some("Landlord"));

    let insights = commands::run_insights(
        &AnalyticsConfig::default(),
        &model,
        &file,
        Some("suggested_category"),
    )
    .unwrap();
    assert_eq!(insights[0].category.as_deref(), Some("rent"));

    assert!(commands::run_insights(&AnalyticsConfig::default(), &model, &file, Some("weekday")).is_err());
}

// ========== Training Command Tests ==========

#[test]
fn test_train_categorizer_seed_set() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("models").join("categorizer.json");

    let model = commands::train_categorizer(None, &output, 0.1).unwrap();
    assert_eq!(model.labels().len(), 6);
    assert!(output.exists());

    let loaded = NaiveBayesClassifier::load(&output).unwrap();
    assert_eq!(loaded.labels(), model.labels());
}

#[test]
fn test_train_categorizer_from_csv() {
    let dir = TempDir::new().unwrap();
    let data = write_file(
        &dir,
        "labeled.csv",
        "description,category\nAWS invoice,software\nGitHub seats,software\nDiesel,transport\n",
    );
    let output = dir.path().join("categorizer.json");

    let model = commands::train_categorizer(Some(&data), &output, 0.5).unwrap();
    assert_eq!(model.labels(), &["software".to_string(), "transport".to_string()]);
    assert_eq!(model.predict_one("AWS bill"), "software");
}

#[test]
fn test_train_categorizer_rejects_bad_alpha() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("categorizer.json");
    assert!(commands::train_categorizer(None, &output, 0.0).is_err());
    assert!(!output.exists());
}

#[test]
fn test_cmd_config_prints_embedded() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "analytics.toml", "[forecast]\ndefault_days = 14\n");
    assert!(commands::cmd_config(Some(&path)).is_ok());
}
