//! Time-series fitting capability
//!
//! The engine only needs two operations from a model: fit a history with a set of
//! seasonal components, then predict a central estimate and band for arbitrary dates.

use chrono::{Duration, NaiveDate};

use crate::error::Result;
use crate::models::HistoricalSeries;

use super::seasonality::SeasonalitySettings;

/// One row of model output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPrediction {
    pub date: NaiveDate,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

/// A fitting algorithm with built-in seasonal decomposition
///
/// Implementations return `Error::InsufficientData` when the history is too thin to fit,
/// and `Error::ForecastingFailure` for any other fitting problem.
pub trait SeasonalModel: Send + Sync {
    /// Short identifier for logging
    fn name(&self) -> &'static str;

    /// Fit the history with the given seasonal components
    fn fit(
        &self,
        history: &HistoricalSeries,
        seasonality: &SeasonalitySettings,
    ) -> Result<Box<dyn FittedModel>>;
}

/// A fitted model ready to predict
pub trait FittedModel: Send {
    /// Predict one row per date, in the order given
    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ModelPrediction>>;
}

/// Prediction frame: distinct history dates followed by `periods` daily dates after the last one
pub fn make_future_dates(history: &HistoricalSeries, periods: usize) -> Vec<NaiveDate> {
    let mut dates = history.unique_dates();
    if let Some(last) = history.last_date() {
        dates.extend((1..=periods as i64).map(|i| last + Duration::days(i)));
    }
    dates
}
