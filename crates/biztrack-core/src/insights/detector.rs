//! Spend-share anomaly detection

use std::collections::HashMap;

use crate::config::InsightsConfig;
use crate::error::{Error, Result};
use crate::models::{ExpenseEntry, Insight, InsightKind, Severity};

const ANOMALY_ACTION: &str = "Review individual receipts for potential overspending.";
const HEALTHY_MESSAGE: &str = "Your spending patterns are healthy and stable.";
const HEALTHY_ACTION: &str = "Maintain your current budget oversight.";

/// Summed spend per category, in first-occurrence order
///
/// Blank category labels are not grouped and contribute nothing to the total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorySpendMap {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl CategorySpendMap {
    pub fn from_expenses(expenses: &[ExpenseEntry]) -> Self {
        let mut map = Self::default();
        for expense in expenses {
            map.add(&expense.category, expense.amount);
        }
        map
    }

    pub fn add(&mut self, category: &str, amount: f64) {
        if category.trim().is_empty() {
            return;
        }
        match self.index.get(category) {
            Some(&i) => self.entries[i].1 += amount,
            None => {
                self.index.insert(category.to_string(), self.entries.len());
                self.entries.push((category.to_string(), amount));
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.index.get(category).map(|&i| self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(c, a)| (c.as_str(), *a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all categories
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, a)| a).sum()
    }
}

/// Flags categories that take a disproportionate share of total spend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsightDetector {
    threshold: f64,
}

impl InsightDetector {
    /// Default share threshold (30% of total)
    pub const DEFAULT_THRESHOLD: f64 = 0.3;

    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &InsightsConfig) -> Self {
        Self::new(config.anomaly_threshold)
    }

    /// Insights for a request's expenses
    ///
    /// Empty input gives no insights. Otherwise every category whose amount exceeds
    /// `threshold * total` yields one anomaly; if none does, a single info insight is
    /// returned. Flagging a category against a zero or non-finite total is rejected,
    /// since its share cannot be computed.
    pub fn detect(&self, expenses: &[ExpenseEntry]) -> Result<Vec<Insight>> {
        if expenses.is_empty() {
            return Ok(Vec::new());
        }

        let spend = CategorySpendMap::from_expenses(expenses);
        let total = spend.total();
        let flagged: Vec<(&str, f64)> = spend
            .iter()
            .filter(|(_, amount)| *amount > total * self.threshold)
            .collect();
        if !flagged.is_empty() && (total == 0.0 || !total.is_finite()) {
            return Err(Error::InvalidData(format!(
                "total spend must be non-zero and finite to compute shares (got {})",
                total
            )));
        }

        let mut insights: Vec<Insight> = flagged
            .into_iter()
            .map(|(category, amount)| Insight {
                kind: InsightKind::Anomaly,
                category: Some(category.to_string()),
                severity: Some(Severity::Medium),
                message: format!(
                    "Spending in {} is unusually high ({:.1}% of total).",
                    category,
                    amount / total * 100.0
                ),
                action: ANOMALY_ACTION.to_string(),
            })
            .collect();

        tracing::debug!(
            categories = spend.len(),
            total,
            anomalies = insights.len(),
            threshold = self.threshold,
            "Spend insights computed"
        );

        if insights.is_empty() {
            insights.push(Insight {
                kind: InsightKind::Info,
                category: None,
                severity: None,
                message: HEALTHY_MESSAGE.to_string(),
                action: HEALTHY_ACTION.to_string(),
            });
        }

        Ok(insights)
    }
}

impl Default for InsightDetector {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}
