//! Domain models for BizTrack

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A transaction as submitted by the accounting product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub description: Option<String>,
    pub amount: f64,
    /// Calendar date, `YYYY-MM-DD` or RFC 3339
    pub date: String,
    #[serde(default)]
    pub vendor: Option<String>,
}

impl Transaction {
    /// Description text, empty when the caller omitted it
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Parse the transaction date
    pub fn parsed_date(&self) -> Result<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Parse a calendar date from `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, or RFC 3339
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.date());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }
    Err(Error::InvalidData(format!("Unparseable date: {:?}", s)))
}

/// One observed amount on one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Date-ordered observations for a single stream (income or expense)
///
/// Points sharing a date are kept as-is; aggregation is the caller's concern.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalSeries {
    points: Vec<TimeSeriesPoint>,
}

impl HistoricalSeries {
    /// Build a series, ordering points by date (stable for same-date points)
    pub fn new(mut points: Vec<TimeSeriesPoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a series from request transactions
    pub fn from_transactions(transactions: &[Transaction]) -> Result<Self> {
        let points = transactions
            .iter()
            .map(|tx| Ok(TimeSeriesPoint::new(tx.parsed_date()?, tx.amount)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(points))
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Days between the earliest and latest observation (0 for empty or single-point series)
    pub fn span_days(&self) -> i64 {
        match (self.first_date(), self.last_date()) {
            (Some(first), Some(last)) => (last - first).num_days(),
            _ => 0,
        }
    }

    /// Distinct observation dates in ascending order
    pub fn unique_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.points.iter().map(|p| p.date).collect();
        dates.dedup();
        dates
    }
}

/// One future day's prediction with its uncertainty band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    #[serde(rename = "ds")]
    pub date: NaiveDate,
    #[serde(rename = "yhat")]
    pub point_estimate: f64,
    #[serde(rename = "yhat_lower")]
    pub lower_bound: f64,
    #[serde(rename = "yhat_upper")]
    pub upper_bound: f64,
}

/// Which seasonal structure produced a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalityMode {
    Weekly,
    Yearly,
    /// No history was supplied
    None,
    /// Placeholder forecast, no model was fitted
    Fallback,
}

impl SeasonalityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Yearly => "yearly",
            Self::None => "none",
            Self::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for SeasonalityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shaped forecast for one stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub predictions: Vec<ForecastPoint>,
    pub trend_percentage: f64,
    pub seasonality_mode: SeasonalityMode,
}

impl ForecastResult {
    /// Result for a stream with no history at all
    pub fn none() -> Self {
        Self {
            predictions: Vec::new(),
            trend_percentage: 0.0,
            seasonality_mode: SeasonalityMode::None,
        }
    }
}

/// Suggested category for one description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPrediction {
    pub category: String,
    /// Trust in the label, in [0, 1]
    pub confidence: f64,
}

/// A categorized expense fed to the insight detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub category: String,
    pub amount: f64,
}

impl ExpenseEntry {
    pub fn new(category: impl Into<String>, amount: f64) -> Self {
        Self {
            category: category.into(),
            amount,
        }
    }
}

/// Kind of insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    /// A category takes a disproportionate share of spend
    Anomaly,
    /// Nothing stands out
    Info,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anomaly => "anomaly",
            Self::Info => "info",
        }
    }
}

/// Severity of an anomaly insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A human-readable finding about spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    pub message: String,
    pub action: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-03-05").unwrap(), date(2024, 3, 5));
        assert_eq!(parse_date("2024-03-05T10:00:00Z").unwrap(), date(2024, 3, 5));
        assert_eq!(parse_date("2024-03-05T10:00:00").unwrap(), date(2024, 3, 5));
        assert!(parse_date("03/05/2024").is_err());
    }

    #[test]
    fn test_series_sorted_and_span() {
        let series = HistoricalSeries::new(vec![
            TimeSeriesPoint::new(date(2024, 3, 1), 10.0),
            TimeSeriesPoint::new(date(2024, 1, 1), 5.0),
            TimeSeriesPoint::new(date(2024, 1, 1), 7.0),
        ]);
        assert_eq!(series.first_date(), Some(date(2024, 1, 1)));
        assert_eq!(series.span_days(), 60);
        assert_eq!(series.unique_dates().len(), 2);
        // Same-date points keep their submission order
        assert_eq!(series.points()[0].value, 5.0);
        assert_eq!(series.points()[1].value, 7.0);
    }

    #[test]
    fn test_series_from_transactions_rejects_bad_date() {
        let txs = vec![Transaction {
            description: Some("Rent".to_string()),
            amount: 100.0,
            date: "not a date".to_string(),
            vendor: None,
        }];
        assert!(HistoricalSeries::from_transactions(&txs).is_err());
    }

    #[test]
    fn test_insight_serialization_omits_empty_fields() {
        let insight = Insight {
            kind: InsightKind::Info,
            category: None,
            severity: None,
            message: "ok".to_string(),
            action: "none".to_string(),
        };
        let json = serde_json::to_value(&insight).unwrap();
        assert_eq!(json["type"], "info");
        assert!(json.get("category").is_none());
        assert!(json.get("severity").is_none());
    }

    #[test]
    fn test_forecast_point_wire_names() {
        let point = ForecastPoint {
            date: date(2024, 1, 2),
            point_estimate: 1.0,
            lower_bound: 0.5,
            upper_bound: 1.5,
        };
        let json = serde_json::to_value(point).unwrap();
        assert_eq!(json["ds"], "2024-01-02");
        assert_eq!(json["yhat_lower"], 0.5);
    }
}
