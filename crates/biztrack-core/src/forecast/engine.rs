//! Forecast engine - fits a stream's history and shapes the prediction

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::{ForecastPoint, ForecastResult, HistoricalSeries};

use super::additive::AdditiveSeasonalModel;
use super::model::{make_future_dates, SeasonalModel};
use super::seasonality::select_seasonality;
use super::trend::compute_trend;

/// Orchestrates seasonality selection, delegated fitting, and result shaping
#[derive(Clone)]
pub struct ForecastEngine {
    model: Arc<dyn SeasonalModel>,
}

impl ForecastEngine {
    pub fn new(model: Arc<dyn SeasonalModel>) -> Self {
        Self { model }
    }

    /// Forecast `horizon_days` days past the end of `series`
    ///
    /// An empty series yields an empty "none" result. Fitting errors are returned as-is
    /// (`InsufficientData` or `ForecastingFailure`); substituting a fallback is the
    /// caller's decision.
    ///
    /// The trend baseline is the prediction at index `series.len()` of the combined
    /// history + future output, i.e. the first predicted day when history dates are
    /// distinct. The last observed actual is never used.
    pub fn forecast(&self, series: &HistoricalSeries, horizon_days: usize) -> Result<ForecastResult> {
        if series.is_empty() {
            return Ok(ForecastResult::none());
        }
        if horizon_days == 0 {
            return Err(Error::InvalidData(
                "forecast horizon must be at least one day".to_string(),
            ));
        }

        let seasonality = select_seasonality(series);
        let fitted = self.model.fit(series, &seasonality)?;

        let frame = make_future_dates(series, horizon_days);
        let output = fitted.predict(&frame)?;
        if output.len() != frame.len() {
            return Err(Error::ForecastingFailure(format!(
                "model returned {} rows for {} dates",
                output.len(),
                frame.len()
            )));
        }

        let first = output.get(series.len()).ok_or_else(|| {
            Error::ForecastingFailure(format!(
                "trend baseline index {} out of range for {} predicted rows",
                series.len(),
                output.len()
            ))
        })?;
        // Non-empty: frame has at least horizon_days rows
        let last = output[output.len() - 1];
        let trend_percentage = compute_trend(first.yhat, last.yhat);

        let predictions = output[output.len() - horizon_days..]
            .iter()
            .map(|p| ForecastPoint {
                date: p.date,
                point_estimate: p.yhat,
                lower_bound: p.yhat_lower,
                upper_bound: p.yhat_upper,
            })
            .collect();

        tracing::debug!(
            model = self.model.name(),
            points = series.len(),
            horizon_days,
            mode = %seasonality.mode(),
            trend_percentage,
            "Forecast complete"
        );

        Ok(ForecastResult {
            predictions,
            trend_percentage,
            seasonality_mode: seasonality.mode(),
        })
    }
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new(Arc::new(AdditiveSeasonalModel::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::model::{FittedModel, ModelPrediction};
    use crate::forecast::seasonality::SeasonalitySettings;
    use crate::models::{SeasonalityMode, TimeSeriesPoint};
    use chrono::{Duration, NaiveDate};

    /// Predicts each row's position in the frame, so index semantics are visible
    struct PositionModel;

    struct PositionFitted;

    impl SeasonalModel for PositionModel {
        fn name(&self) -> &'static str {
            "position"
        }

        fn fit(
            &self,
            _history: &HistoricalSeries,
            _seasonality: &SeasonalitySettings,
        ) -> Result<Box<dyn FittedModel>> {
            Ok(Box::new(PositionFitted))
        }
    }

    impl FittedModel for PositionFitted {
        fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ModelPrediction>> {
            Ok(dates
                .iter()
                .enumerate()
                .map(|(i, &date)| ModelPrediction {
                    date,
                    yhat: i as f64,
                    yhat_lower: i as f64 - 1.0,
                    yhat_upper: i as f64 + 1.0,
                })
                .collect())
        }
    }

    struct FailingModel;

    impl SeasonalModel for FailingModel {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn fit(
            &self,
            _history: &HistoricalSeries,
            _seasonality: &SeasonalitySettings,
        ) -> Result<Box<dyn FittedModel>> {
            Err(Error::ForecastingFailure("optimizer diverged".to_string()))
        }
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn series(offsets: &[i64]) -> HistoricalSeries {
        HistoricalSeries::new(
            offsets
                .iter()
                .map(|&o| TimeSeriesPoint::new(start() + Duration::days(o), 100.0))
                .collect(),
        )
    }

    #[test]
    fn test_empty_series_returns_none() {
        let engine = ForecastEngine::new(Arc::new(FailingModel));
        let result = engine.forecast(&HistoricalSeries::empty(), 30).unwrap();
        assert_eq!(result, ForecastResult::none());
    }

    #[test]
    fn test_predictions_are_future_tail() {
        let engine = ForecastEngine::new(Arc::new(PositionModel));
        let result = engine.forecast(&series(&[0, 1, 2]), 5).unwrap();

        assert_eq!(result.predictions.len(), 5);
        assert_eq!(result.predictions[0].date, start() + Duration::days(3));
        assert_eq!(result.predictions[0].point_estimate, 3.0);
        assert_eq!(result.predictions[4].point_estimate, 7.0);
        assert_eq!(result.seasonality_mode, SeasonalityMode::Weekly);
    }

    #[test]
    fn test_trend_baseline_is_first_predicted_day() {
        let engine = ForecastEngine::new(Arc::new(PositionModel));
        let result = engine.forecast(&series(&[0, 1, 2]), 5).unwrap();
        // first = row 3, last = row 7
        assert_eq!(result.trend_percentage, compute_trend(3.0, 7.0));
    }

    #[test]
    fn test_trend_baseline_counts_duplicate_dates() {
        let engine = ForecastEngine::new(Arc::new(PositionModel));
        // Four points over three distinct dates: frame has 3 + 5 rows, baseline is row 4
        let result = engine.forecast(&series(&[0, 1, 1, 2]), 5).unwrap();
        assert_eq!(result.trend_percentage, compute_trend(4.0, 7.0));
        assert_eq!(result.predictions.len(), 5);
    }

    #[test]
    fn test_baseline_out_of_range_is_failure() {
        let engine = ForecastEngine::new(Arc::new(PositionModel));
        // Five points on two dates with a one-day horizon: frame has 3 rows
        let err = engine.forecast(&series(&[0, 0, 0, 0, 1]), 1).err().unwrap();
        assert!(matches!(err, Error::ForecastingFailure(_)));
    }

    #[test]
    fn test_yearly_mode_for_long_history() {
        let engine = ForecastEngine::new(Arc::new(PositionModel));
        let result = engine.forecast(&series(&[0, 200, 400]), 3).unwrap();
        assert_eq!(result.seasonality_mode, SeasonalityMode::Yearly);
    }

    #[test]
    fn test_fit_failure_propagates() {
        let engine = ForecastEngine::new(Arc::new(FailingModel));
        let err = engine.forecast(&series(&[0, 1, 2]), 5).err().unwrap();
        assert!(matches!(err, Error::ForecastingFailure(_)));
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let engine = ForecastEngine::default();
        let err = engine.forecast(&series(&[0, 1, 2]), 0).err().unwrap();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_default_engine_output_length() {
        let engine = ForecastEngine::default();
        let history = HistoricalSeries::new(
            (0..60)
                .map(|i| TimeSeriesPoint::new(start() + Duration::days(i), 100.0 + i as f64))
                .collect(),
        );
        for days in [1, 7, 30, 90] {
            let result = engine.forecast(&history, days).unwrap();
            assert_eq!(result.predictions.len(), days);
        }
    }
}
