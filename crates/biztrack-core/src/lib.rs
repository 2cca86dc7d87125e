//! BizTrack Core Library
//!
//! Financial analytics for small-business bookkeeping:
//! - Cash-flow forecasting with adaptive seasonality and a degraded-data fallback
//! - Transaction categorization (trained classifier or keyword rules)
//! - Spend-share anomaly insights
//! - Transaction history import (JSON, CSV)
//! - Layered configuration with an embedded default

pub mod categorize;
pub mod config;
pub mod error;
pub mod forecast;
pub mod import;
pub mod insights;
pub mod models;

pub use categorize::{CategoryResolver, KeywordCategorizer, NaiveBayesClassifier, TextClassifier};
pub use config::{AnalyticsConfig, GroupBy};
pub use error::{Error, Result};
pub use forecast::{CashFlowForecast, CashFlowForecaster, ForecastEngine};
pub use import::load_transactions;
pub use insights::{expense_entries, CategorySpendMap, InsightDetector};
pub use models::{
    CategoryPrediction, ExpenseEntry, ForecastPoint, ForecastResult, HistoricalSeries, Insight,
    InsightKind, SeasonalityMode, Severity, TimeSeriesPoint, Transaction,
};
