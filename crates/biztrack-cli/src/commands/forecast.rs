//! Forecast command implementation

use std::path::Path;

use anyhow::{bail, Result};

use biztrack_core::config::AnalyticsConfig;
use biztrack_core::forecast::{CashFlowForecast, CashFlowForecaster};
use biztrack_core::models::{ForecastResult, HistoricalSeries};

use super::load_history;

/// Forecast both streams from history files
pub fn run_forecast(
    analytics: &AnalyticsConfig,
    income: Option<&Path>,
    expense: Option<&Path>,
    days: Option<u32>,
) -> Result<CashFlowForecast> {
    let days = days.unwrap_or(analytics.forecast.default_days);
    if days == 0 {
        bail!("--days must be at least 1");
    }

    let income = HistoricalSeries::from_transactions(&load_history(income)?)?;
    let expense = HistoricalSeries::from_transactions(&load_history(expense)?)?;

    let forecaster = CashFlowForecaster::new(&analytics.forecast);
    Ok(forecaster.forecast(&income, &expense, days as usize)?)
}

pub fn cmd_forecast(
    analytics: &AnalyticsConfig,
    income: Option<&Path>,
    expense: Option<&Path>,
    days: Option<u32>,
    json: bool,
) -> Result<()> {
    if income.is_none() && expense.is_none() {
        bail!("Provide at least one of --income or --expense");
    }

    let forecast = run_forecast(analytics, income, expense, days)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&forecast)?);
        return Ok(());
    }

    println!();
    println!("📈 Cash-flow forecast (seasonality: {})", forecast.seasonality());
    print_stream("Income", &forecast.income);
    print_stream("Expenses", &forecast.expense);
    Ok(())
}

fn print_stream(label: &str, result: &ForecastResult) {
    println!();
    println!("   {}", label);
    println!("   ─────────────────────────────────────────────────");
    if result.predictions.is_empty() {
        println!("   (no history)");
        return;
    }

    let total: f64 = result.predictions.iter().map(|p| p.point_estimate).sum();
    println!(
        "   Trend: {:+.2}%   Mode: {}   Horizon total: {:.2}",
        result.trend_percentage,
        result.seasonality_mode,
        total
    );
    println!("   {:<12} {:>12} {:>12} {:>12}", "Date", "Estimate", "Low", "High");
    for p in &result.predictions {
        println!(
            "   {:<12} {:>12.2} {:>12.2} {:>12.2}",
            p.date.to_string(),
            p.point_estimate,
            p.lower_bound,
            p.upper_bound
        );
    }
}
