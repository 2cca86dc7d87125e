//! Analytics configuration
//!
//! Thresholds, fallback constants, and keyword rules live in a TOML file so they can be
//! tuned without a rebuild.
//!
//! ## Configuration Resolution
//!
//! 1. Explicit path (CLI `--config` or `BIZTRACK_CONFIG`)
//! 2. Override in data dir (~/.local/share/biztrack/config/analytics.toml)
//! 3. Embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analytics.toml");

/// Top-level analytics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub forecast: ForecastConfig,
    pub categorize: CategorizeConfig,
    pub insights: InsightsConfig,
}

/// Forecasting settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Horizon used when a request omits `days`
    pub default_days: u32,
    /// Streams with fewer observations get the placeholder forecast
    pub min_history_points: usize,
    pub fallback: FallbackConfig,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_days: 30,
            min_history_points: 2,
            fallback: FallbackConfig::default(),
        }
    }
}

/// Constants of the placeholder forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub point_estimate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            point_estimate: 1000.0,
            lower_bound: 800.0,
            upper_bound: 1200.0,
        }
    }
}

/// Categorization settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorizeConfig {
    /// Confidence reported when the classifier cannot score its predictions
    pub model_confidence_default: f64,
    /// Confidence reported for keyword-rule matches
    pub heuristic_confidence: f64,
    /// Ordered keyword rules; first match wins
    pub rules: Vec<KeywordRule>,
}

impl Default for CategorizeConfig {
    fn default() -> Self {
        Self {
            model_confidence_default: 0.8,
            heuristic_confidence: 0.4,
            rules: default_rules(),
        }
    }
}

/// A category and the keywords that select it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub category: String,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new(category: &str, keywords: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

fn default_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new("rent", &["rent", "lease", "office"]),
        KeywordRule::new("salaries", &["salary", "wage", "pay", "staff"]),
        KeywordRule::new("stock", &["stock", "inventory", "buy", "purchase"]),
        KeywordRule::new("transport", &["uber", "fuel", "transport", "taxi"]),
        KeywordRule::new("utilities", &["electric", "water", "bill", "power"]),
        KeywordRule::new(
            "marketing",
            &["ad", "marketing", "facebook", "google", "promo"],
        ),
    ]
}

/// Insight settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsConfig {
    /// Share of total spend above which a category is flagged (0.3 = 30%)
    pub anomaly_threshold: f64,
    pub group_by: GroupBy,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            anomaly_threshold: 0.3,
            group_by: GroupBy::Description,
        }
    }
}

/// Which field of a transaction names its spend category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// Raw transaction description
    #[default]
    Description,
    /// Vendor name, falling back to the description
    Vendor,
    /// Category suggested by the categorizer
    SuggestedCategory,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Vendor => "vendor",
            Self::SuggestedCategory => "suggested_category",
        }
    }
}

impl std::str::FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "description" => Ok(Self::Description),
            "vendor" => Ok(Self::Vendor),
            "suggested_category" | "category" => Ok(Self::SuggestedCategory),
            _ => Err(format!("Unknown grouping key: {}", s)),
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration (explicit path, then data dir override, then embedded default)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(p) => fs::read_to_string(p).map_err(|e| {
                Error::Config(format!("Failed to read config {}: {}", p.display(), e))
            })?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(p) => {
                    tracing::debug!(path = %p.display(), "Using analytics config override");
                    fs::read_to_string(&p).map_err(|e| {
                        Error::Config(format!("Failed to read config {}: {}", p.display(), e))
                    })?
                }
                None => DEFAULT_CONFIG.to_string(),
            },
        };

        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AnalyticsConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Embedded default configuration
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// Reject settings the pipeline cannot honor
    pub fn validate(&self) -> Result<()> {
        let fb = &self.forecast.fallback;
        if !(fb.lower_bound <= fb.point_estimate && fb.point_estimate <= fb.upper_bound) {
            return Err(Error::Config(format!(
                "fallback band must satisfy lower <= point <= upper (got {} / {} / {})",
                fb.lower_bound, fb.point_estimate, fb.upper_bound
            )));
        }

        for (name, value) in [
            (
                "categorize.model_confidence_default",
                self.categorize.model_confidence_default,
            ),
            (
                "categorize.heuristic_confidence",
                self.categorize.heuristic_confidence,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if !(self.insights.anomaly_threshold > 0.0 && self.insights.anomaly_threshold < 1.0) {
            return Err(Error::Config(format!(
                "insights.anomaly_threshold must be within (0, 1), got {}",
                self.insights.anomaly_threshold
            )));
        }

        if let Some(rule) = self
            .categorize
            .rules
            .iter()
            .find(|r| r.category.trim().is_empty() || r.keywords.is_empty())
        {
            return Err(Error::Config(format!(
                "keyword rule {:?} needs a category and at least one keyword",
                rule.category
            )));
        }

        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("biztrack").join("config").join("analytics.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_matches_defaults() {
        let embedded = AnalyticsConfig::embedded().unwrap();
        assert_eq!(embedded, AnalyticsConfig::default());
    }

    #[test]
    fn test_rule_order_preserved() {
        let config = AnalyticsConfig::default();
        let order: Vec<&str> = config
            .categorize
            .rules
            .iter()
            .map(|r| r.category.as_str())
            .collect();
        assert_eq!(
            order,
            vec!["rent", "salaries", "stock", "transport", "utilities", "marketing"]
        );
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = AnalyticsConfig::from_toml_str(
            r#"
[insights]
anomaly_threshold = 0.5
"#,
        )
        .unwrap();
        assert_eq!(config.insights.anomaly_threshold, 0.5);
        assert_eq!(config.insights.group_by, GroupBy::Description);
        assert_eq!(config.forecast.default_days, 30);
        assert_eq!(config.categorize.rules.len(), 6);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let err = AnalyticsConfig::from_toml_str("[insights]\nanomaly_threshold = 1.5\n");
        assert!(matches!(err, Err(Error::Config(_))));
    }

    #[test]
    fn test_inverted_fallback_band_rejected() {
        let err = AnalyticsConfig::from_toml_str(
            "[forecast.fallback]\nlower_bound = 1500.0\nupper_bound = 1200.0\n",
        );
        assert!(matches!(err, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[insights]\ngroup_by = \"vendor\"").unwrap();

        let config = AnalyticsConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.insights.group_by, GroupBy::Vendor);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let result = AnalyticsConfig::load(Some(Path::new("/nonexistent/analytics.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
