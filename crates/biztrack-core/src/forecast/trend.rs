//! Trend extraction from a forecast series

/// Added to the baseline so a zero first value does not divide by zero
pub const TREND_EPSILON: f64 = 1e-6;

/// Percentage change from `first` to `last`, rounded to two decimals
///
/// Baselines near zero produce very large (but finite) percentages. Treat those as
/// low-confidence.
pub fn compute_trend(first: f64, last: f64) -> f64 {
    let pct = ((last - first) / (first + TREND_EPSILON)) * 100.0;
    round2(pct)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth() {
        assert_eq!(compute_trend(100.0, 150.0), 50.0);
    }

    #[test]
    fn test_decline() {
        assert_eq!(compute_trend(200.0, 150.0), -25.0);
    }

    #[test]
    fn test_flat() {
        assert_eq!(compute_trend(42.0, 42.0), 0.0);
    }

    #[test]
    fn test_zero_baseline_is_finite() {
        let pct = compute_trend(0.0, 10.0);
        assert!(pct.is_finite());
        assert!(pct > 1e8);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        // (1 / 3) * 100 = 33.333...
        assert_eq!(compute_trend(3.0, 4.0), 33.33);
    }
}
