//! Placeholder forecast for businesses with too little history

use chrono::{Duration, Local, NaiveDate};

use crate::config::FallbackConfig;
use crate::models::{ForecastPoint, ForecastResult, SeasonalityMode};

/// Produces a fixed, non-data-driven forecast
///
/// Output depends only on the horizon and the generation date, so repeated calls on the
/// same day are identical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackForecastGenerator {
    config: FallbackConfig,
}

impl FallbackForecastGenerator {
    pub fn new(config: FallbackConfig) -> Self {
        Self { config }
    }

    /// Placeholder forecast starting tomorrow (local time)
    pub fn generate(&self, horizon_days: usize) -> ForecastResult {
        self.generate_from(Local::now().date_naive(), horizon_days)
    }

    /// Placeholder forecast for the `horizon_days` days following `today`
    pub fn generate_from(&self, today: NaiveDate, horizon_days: usize) -> ForecastResult {
        let predictions = (1..=horizon_days as i64)
            .map(|i| ForecastPoint {
                date: today + Duration::days(i),
                point_estimate: self.config.point_estimate,
                lower_bound: self.config.lower_bound,
                upper_bound: self.config.upper_bound,
            })
            .collect();

        ForecastResult {
            predictions,
            trend_percentage: 0.0,
            seasonality_mode: SeasonalityMode::Fallback,
        }
    }
}

impl Default for FallbackForecastGenerator {
    fn default() -> Self {
        Self::new(FallbackConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_shape() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        let result = FallbackForecastGenerator::default().generate_from(today, 4);

        assert_eq!(result.seasonality_mode, SeasonalityMode::Fallback);
        assert_eq!(result.trend_percentage, 0.0);
        assert_eq!(result.predictions.len(), 4);

        let dates: Vec<String> = result
            .predictions
            .iter()
            .map(|p| p.date.to_string())
            .collect();
        assert_eq!(
            dates,
            vec!["2024-02-28", "2024-02-29", "2024-03-01", "2024-03-02"]
        );

        for p in &result.predictions {
            assert_eq!(p.point_estimate, 1000.0);
            assert_eq!(p.lower_bound, 800.0);
            assert_eq!(p.upper_bound, 1200.0);
        }
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let generator = FallbackForecastGenerator::default();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            generator.generate_from(today, 30),
            generator.generate_from(today, 30)
        );
    }

    #[test]
    fn test_generate_starts_tomorrow() {
        let result = FallbackForecastGenerator::default().generate(1);
        let tomorrow = Local::now().date_naive() + Duration::days(1);
        // Allow for the test straddling midnight
        let first = result.predictions[0].date;
        assert!(first == tomorrow || first == tomorrow + Duration::days(1));
    }

    #[test]
    fn test_custom_constants() {
        let generator = FallbackForecastGenerator::new(FallbackConfig {
            point_estimate: 50.0,
            lower_bound: 40.0,
            upper_bound: 60.0,
        });
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let result = generator.generate_from(today, 2);
        assert_eq!(result.predictions[1].point_estimate, 50.0);
        assert_eq!(result.predictions[1].upper_bound, 60.0);
    }

    #[test]
    fn test_zero_horizon() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(FallbackForecastGenerator::default()
            .generate_from(today, 0)
            .predictions
            .is_empty());
    }
}
