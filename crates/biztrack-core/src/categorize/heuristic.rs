//! Keyword-rule categorization used when no trained classifier is loaded

use crate::config::{CategorizeConfig, KeywordRule};
use crate::models::CategoryPrediction;

/// Category assigned when no rule matches
pub const DEFAULT_CATEGORY: &str = "other";

/// Ordered keyword rules; first match wins
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordCategorizer {
    rules: Vec<KeywordRule>,
    confidence: f64,
}

impl KeywordCategorizer {
    pub fn new(rules: Vec<KeywordRule>, confidence: f64) -> Self {
        // Matching is case-insensitive; normalize keywords once
        let rules = rules
            .into_iter()
            .map(|r| KeywordRule {
                category: r.category,
                keywords: r.keywords.iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect();
        Self { rules, confidence }
    }

    pub fn from_config(config: &CategorizeConfig) -> Self {
        Self::new(config.rules.clone(), config.heuristic_confidence)
    }

    /// Category for one description (substring match on any keyword)
    pub fn category_for(&self, description: &str) -> &str {
        let desc = description.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| desc.contains(k.as_str())))
            .map(|rule| rule.category.as_str())
            .unwrap_or(DEFAULT_CATEGORY)
    }

    pub fn categorize(&self, description: &str) -> CategoryPrediction {
        CategoryPrediction {
            category: self.category_for(description).to_string(),
            confidence: self.confidence,
        }
    }
}

impl Default for KeywordCategorizer {
    fn default() -> Self {
        Self::from_config(&CategorizeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let categorizer = KeywordCategorizer::default();
        assert_eq!(categorizer.category_for("Paid office space rent"), "rent");
        assert_eq!(categorizer.category_for("Uber for business meeting"), "transport");
        assert_eq!(categorizer.category_for("Staff lunch"), "salaries");
        assert_eq!(categorizer.category_for("Water and power"), "utilities");
        assert_eq!(categorizer.category_for("Google Ads"), "marketing");
    }

    #[test]
    fn test_case_insensitive() {
        let categorizer = KeywordCategorizer::default();
        assert_eq!(categorizer.category_for("INVENTORY TOP-UP"), "stock");
    }

    #[test]
    fn test_first_rule_wins() {
        let categorizer = KeywordCategorizer::default();
        // Matches both rent ("office") and utilities ("bill")
        assert_eq!(categorizer.category_for("Office electricity bill"), "rent");
    }

    #[test]
    fn test_unmatched_is_other_with_low_confidence() {
        let categorizer = KeywordCategorizer::default();
        let prediction = categorizer.categorize("Coffee beans");
        assert_eq!(prediction.category, "other");
        assert_eq!(prediction.confidence, 0.4);
    }

    #[test]
    fn test_empty_description_is_other() {
        assert_eq!(KeywordCategorizer::default().category_for(""), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_custom_rules_are_lowercased() {
        let categorizer = KeywordCategorizer::new(
            vec![KeywordRule::new("software", &["GitHub", "AWS"])],
            0.5,
        );
        let prediction = categorizer.categorize("github team plan");
        assert_eq!(prediction.category, "software");
        assert_eq!(prediction.confidence, 0.5);
    }
}
