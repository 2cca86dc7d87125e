//! Adaptive seasonality selection

use serde::{Deserialize, Serialize};

use crate::models::{HistoricalSeries, SeasonalityMode};

/// History must span more than this many days before yearly seasonality is fitted
pub const YEARLY_SPAN_THRESHOLD_DAYS: i64 = 365;

/// Seasonal components to enable when fitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalitySettings {
    pub weekly: bool,
    pub yearly: bool,
    /// Intra-day patterns are noise for business cash flow; never enabled
    pub daily: bool,
}

impl SeasonalitySettings {
    /// Mode reported alongside a fitted forecast
    pub fn mode(&self) -> SeasonalityMode {
        if self.yearly {
            SeasonalityMode::Yearly
        } else {
            SeasonalityMode::Weekly
        }
    }
}

/// Choose seasonal components from the span of the history
///
/// Weekly is always on. Yearly needs more than a year between the earliest and latest
/// observation, so a single-point series (span 0) never gets it.
pub fn select_seasonality(series: &HistoricalSeries) -> SeasonalitySettings {
    SeasonalitySettings {
        weekly: true,
        yearly: series.span_days() > YEARLY_SPAN_THRESHOLD_DAYS,
        daily: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeSeriesPoint;
    use chrono::{Duration, NaiveDate};

    fn series_spanning(days: i64) -> HistoricalSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        HistoricalSeries::new(vec![
            TimeSeriesPoint::new(start, 100.0),
            TimeSeriesPoint::new(start + Duration::days(days), 120.0),
        ])
    }

    #[test]
    fn test_short_span_is_weekly() {
        let settings = select_seasonality(&series_spanning(90));
        assert!(settings.weekly);
        assert!(!settings.yearly);
        assert!(!settings.daily);
        assert_eq!(settings.mode(), SeasonalityMode::Weekly);
    }

    #[test]
    fn test_exactly_one_year_is_weekly() {
        let settings = select_seasonality(&series_spanning(365));
        assert!(!settings.yearly);
    }

    #[test]
    fn test_over_one_year_is_yearly() {
        let settings = select_seasonality(&series_spanning(366));
        assert!(settings.weekly);
        assert!(settings.yearly);
        assert_eq!(settings.mode(), SeasonalityMode::Yearly);
    }

    #[test]
    fn test_single_point_has_no_yearly() {
        let series = HistoricalSeries::new(vec![TimeSeriesPoint::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            50.0,
        )]);
        assert!(!select_seasonality(&series).yearly);
    }
}
