//! Cash-flow forecast handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, MAX_FORECAST_DAYS};
use biztrack_core::models::{ForecastPoint, HistoricalSeries, SeasonalityMode, Transaction};
use biztrack_core::{CashFlowForecast, Result as CoreResult};

const SUCCESS_MESSAGE: &str = "Advanced forecast generated successfully";
const FAILURE_MESSAGE: &str = "Failed to generate forecast";

/// Request body for a forecast
#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    pub business_id: String,
    #[serde(default)]
    pub income_history: Vec<Transaction>,
    #[serde(default)]
    pub expense_history: Vec<Transaction>,
    /// Horizon in days (server default when omitted)
    pub days: Option<i64>,
}

/// Forecast for both streams
#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub business_id: String,
    pub income_forecast: Vec<ForecastPoint>,
    pub income_trend: f64,
    pub expense_forecast: Vec<ForecastPoint>,
    pub expense_trend: f64,
    /// Seasonality of the income stream
    pub seasonality: SeasonalityMode,
    pub message: String,
}

impl ForecastResponse {
    fn new(business_id: String, forecast: CashFlowForecast) -> Self {
        let seasonality = forecast.seasonality();
        Self {
            business_id,
            income_forecast: forecast.income.predictions,
            income_trend: forecast.income.trend_percentage,
            expense_forecast: forecast.expense.predictions,
            expense_trend: forecast.expense.trend_percentage,
            seasonality,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// Forecast outcome; failures are reported in the body, not the status code
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ForecastReply {
    Forecast(ForecastResponse),
    Failed { error: String, message: String },
}

impl ForecastReply {
    fn failed(error: String) -> Self {
        Self::Failed {
            error,
            message: FAILURE_MESSAGE.to_string(),
        }
    }
}

/// POST /predict/forecast - Forecast income and expenses
///
/// Thin streams get the placeholder forecast; an out-of-range horizon, a fitting failure
/// or an unreadable date is answered with `{error, message}`.
pub async fn predict_forecast(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ForecastRequest>,
) -> Result<Json<ForecastReply>, AppError> {
    let days = request.days.unwrap_or(state.default_days);
    if !(1..=MAX_FORECAST_DAYS).contains(&days) {
        tracing::warn!(business_id = %request.business_id, days, "Forecast horizon out of range");
        return Ok(Json(ForecastReply::failed(format!(
            "days must be between 1 and {} (got {})",
            MAX_FORECAST_DAYS, days
        ))));
    }

    let ForecastRequest {
        business_id,
        income_history,
        expense_history,
        ..
    } = request;

    let forecaster = state.forecaster.clone();
    // Fitting is CPU-bound
    let outcome = tokio::task::spawn_blocking(move || -> CoreResult<CashFlowForecast> {
        let income = HistoricalSeries::from_transactions(&income_history)?;
        let expense = HistoricalSeries::from_transactions(&expense_history)?;
        forecaster.forecast(&income, &expense, days as usize)
    })
    .await?;

    match outcome {
        Ok(forecast) => {
            tracing::info!(
                business_id = %business_id,
                days,
                seasonality = %forecast.seasonality(),
                income_trend = forecast.income.trend_percentage,
                expense_trend = forecast.expense.trend_percentage,
                "Forecast generated"
            );
            Ok(Json(ForecastReply::Forecast(ForecastResponse::new(
                business_id,
                forecast,
            ))))
        }
        Err(e) => {
            tracing::error!(business_id = %business_id, error = %e, "Forecasting error");
            Ok(Json(ForecastReply::failed(e.to_string())))
        }
    }
}
