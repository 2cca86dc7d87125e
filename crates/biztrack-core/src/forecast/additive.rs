//! Built-in additive seasonal model
//!
//! y(t) = trend(t) + weekly(weekday) + yearly(month) + noise
//!
//! - Trend: ordinary least squares over time scaled to [0, 1] across the history
//! - Weekly: mean detrended residual per weekday
//! - Yearly: mean remaining residual per calendar month (only when enabled)
//! - Band: residual standard deviation times `interval_z`, widening with distance past
//!   the end of history

use chrono::{Datelike, NaiveDate};

use crate::error::{Error, Result};
use crate::models::HistoricalSeries;

use super::model::{FittedModel, ModelPrediction, SeasonalModel};
use super::seasonality::SeasonalitySettings;

/// z-score for an 80% uncertainty interval
const DEFAULT_INTERVAL_Z: f64 = 1.2816;

/// Additive trend + seasonality model
#[derive(Debug, Clone)]
pub struct AdditiveSeasonalModel {
    interval_z: f64,
}

impl AdditiveSeasonalModel {
    /// Fewer distinct dates than this cannot define a trend
    pub const MIN_DISTINCT_DATES: usize = 2;

    pub fn new() -> Self {
        Self {
            interval_z: DEFAULT_INTERVAL_Z,
        }
    }
}

impl Default for AdditiveSeasonalModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SeasonalModel for AdditiveSeasonalModel {
    fn name(&self) -> &'static str {
        "additive"
    }

    fn fit(
        &self,
        history: &HistoricalSeries,
        seasonality: &SeasonalitySettings,
    ) -> Result<Box<dyn FittedModel>> {
        let distinct = history.unique_dates().len();
        if distinct < Self::MIN_DISTINCT_DATES {
            return Err(Error::InsufficientData {
                points: distinct,
                minimum: Self::MIN_DISTINCT_DATES,
            });
        }

        let points = history.points();
        if let Some(bad) = points.iter().find(|p| !p.value.is_finite()) {
            return Err(Error::ForecastingFailure(format!(
                "non-finite value {} on {}",
                bad.value, bad.date
            )));
        }

        // Both exist: distinct >= 2
        let (origin, last) = match (history.first_date(), history.last_date()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(Error::ForecastingFailure("empty history".to_string())),
        };
        let span_days = (last - origin).num_days() as f64;

        let ts: Vec<f64> = points
            .iter()
            .map(|p| (p.date - origin).num_days() as f64 / span_days)
            .collect();
        let ys: Vec<f64> = points.iter().map(|p| p.value).collect();

        let (intercept, slope) = least_squares(&ts, &ys)?;

        let mut residuals: Vec<f64> = ts
            .iter()
            .zip(&ys)
            .map(|(t, y)| y - (intercept + slope * t))
            .collect();

        let weekly = if seasonality.weekly {
            let effects = group_means(points.iter().map(|p| weekday_index(p.date)), &residuals, 7);
            for (r, p) in residuals.iter_mut().zip(points) {
                *r -= effects[weekday_index(p.date)];
            }
            effects
        } else {
            vec![0.0; 7]
        };

        let yearly = if seasonality.yearly {
            let effects = group_means(points.iter().map(|p| month_index(p.date)), &residuals, 12);
            for (r, p) in residuals.iter_mut().zip(points) {
                *r -= effects[month_index(p.date)];
            }
            effects
        } else {
            vec![0.0; 12]
        };

        let sigma = (residuals.iter().map(|r| r * r).sum::<f64>() / residuals.len() as f64).sqrt();

        tracing::debug!(
            points = points.len(),
            distinct,
            span_days,
            slope,
            sigma,
            weekly = seasonality.weekly,
            yearly = seasonality.yearly,
            "Fitted additive model"
        );

        Ok(Box::new(FittedAdditiveModel {
            origin,
            last,
            span_days,
            intercept,
            slope,
            weekly,
            yearly,
            sigma,
            interval_z: self.interval_z,
        }))
    }
}

/// Coefficients of a fitted additive model
#[derive(Debug, Clone)]
pub struct FittedAdditiveModel {
    origin: NaiveDate,
    last: NaiveDate,
    span_days: f64,
    intercept: f64,
    slope: f64,
    weekly: Vec<f64>,
    yearly: Vec<f64>,
    sigma: f64,
    interval_z: f64,
}

impl FittedModel for FittedAdditiveModel {
    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ModelPrediction>> {
        dates
            .iter()
            .map(|&date| {
                let t = (date - self.origin).num_days() as f64 / self.span_days;
                let yhat = self.intercept
                    + self.slope * t
                    + self.weekly[weekday_index(date)]
                    + self.yearly[month_index(date)];

                let steps_ahead = (date - self.last).num_days().max(0) as f64;
                let half_width =
                    self.interval_z * self.sigma * (1.0 + steps_ahead / self.span_days).sqrt();

                if !yhat.is_finite() || !half_width.is_finite() {
                    return Err(Error::ForecastingFailure(format!(
                        "non-finite prediction for {}",
                        date
                    )));
                }

                Ok(ModelPrediction {
                    date,
                    yhat,
                    yhat_lower: yhat - half_width,
                    yhat_upper: yhat + half_width,
                })
            })
            .collect()
    }
}

fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

fn month_index(date: NaiveDate) -> usize {
    date.month0() as usize
}

/// Ordinary least squares fit of y = intercept + slope * t
fn least_squares(ts: &[f64], ys: &[f64]) -> Result<(f64, f64)> {
    let n = ts.len() as f64;
    let mean_t = ts.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let sxx: f64 = ts.iter().map(|t| (t - mean_t).powi(2)).sum();
    let sxy: f64 = ts
        .iter()
        .zip(ys)
        .map(|(t, y)| (t - mean_t) * (y - mean_y))
        .sum();

    if sxx <= f64::EPSILON {
        return Err(Error::ForecastingFailure(
            "degenerate time axis: all observations share one date".to_string(),
        ));
    }

    let slope = sxy / sxx;
    Ok((mean_y - slope * mean_t, slope))
}

/// Mean of `values` per bucket; buckets with no observations get 0
fn group_means(buckets: impl Iterator<Item = usize>, values: &[f64], size: usize) -> Vec<f64> {
    let mut sums = vec![0.0; size];
    let mut counts = vec![0usize; size];
    for (bucket, value) in buckets.zip(values) {
        sums[bucket] += value;
        counts[bucket] += 1;
    }
    sums.iter()
        .zip(&counts)
        .map(|(s, &c)| if c > 0 { s / c as f64 } else { 0.0 })
        .collect()
}
