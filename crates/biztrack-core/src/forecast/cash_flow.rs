//! Income and expense forecasting with fallback substitution

use serde::{Deserialize, Serialize};

use crate::config::ForecastConfig;
use crate::error::Result;
use crate::models::{ForecastResult, HistoricalSeries, SeasonalityMode};

use super::engine::ForecastEngine;
use super::fallback::FallbackForecastGenerator;

/// Forecasts for both cash-flow streams of a business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowForecast {
    pub income: ForecastResult,
    pub expense: ForecastResult,
}

impl CashFlowForecast {
    /// Seasonality reported for the business (taken from the income stream)
    pub fn seasonality(&self) -> SeasonalityMode {
        self.income.seasonality_mode
    }
}

/// Runs the forecast engine per stream and degrades to the placeholder forecast when a
/// stream is too thin to fit
#[derive(Clone)]
pub struct CashFlowForecaster {
    engine: ForecastEngine,
    fallback: FallbackForecastGenerator,
    min_history_points: usize,
}

impl CashFlowForecaster {
    pub fn new(config: &ForecastConfig) -> Self {
        Self::with_engine(ForecastEngine::default(), config)
    }

    pub fn with_engine(engine: ForecastEngine, config: &ForecastConfig) -> Self {
        Self {
            engine,
            fallback: FallbackForecastGenerator::new(config.fallback),
            min_history_points: config.min_history_points,
        }
    }

    /// Forecast a single stream
    ///
    /// - empty history: "none" result
    /// - fewer than `min_history_points` points, or the model reports insufficient
    ///   data: placeholder forecast
    /// - any other failure: returned to the caller
    pub fn forecast_stream(&self, series: &HistoricalSeries, days: usize) -> Result<ForecastResult> {
        if series.is_empty() {
            return Ok(ForecastResult::none());
        }

        if series.len() < self.min_history_points {
            tracing::info!(
                points = series.len(),
                minimum = self.min_history_points,
                "History below minimum, using fallback forecast"
            );
            return Ok(self.fallback.generate(days));
        }

        match self.engine.forecast(series, days) {
            Err(e) if e.is_insufficient_data() => {
                tracing::info!(error = %e, "Model reported insufficient data, using fallback forecast");
                Ok(self.fallback.generate(days))
            }
            other => other,
        }
    }

    /// Forecast income and expense streams
    pub fn forecast(
        &self,
        income: &HistoricalSeries,
        expense: &HistoricalSeries,
        days: usize,
    ) -> Result<CashFlowForecast> {
        let income = self.forecast_stream(income, days)?;
        let expense = self.forecast_stream(expense, days)?;

        tracing::debug!(
            income_points = income.predictions.len(),
            income_trend = income.trend_percentage,
            expense_points = expense.predictions.len(),
            expense_trend = expense.trend_percentage,
            seasonality = %income.seasonality_mode,
            "Cash-flow forecast complete"
        );

        Ok(CashFlowForecast { income, expense })
    }
}
