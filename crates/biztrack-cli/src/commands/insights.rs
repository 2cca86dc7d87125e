//! Insights command implementation

use std::path::Path;

use anyhow::{anyhow, Result};

use biztrack_core::categorize::{CategoryResolver, KeywordCategorizer};
use biztrack_core::config::{AnalyticsConfig, GroupBy};
use biztrack_core::insights::{expense_entries, InsightDetector};
use biztrack_core::models::{Insight, InsightKind};

use super::load_history;

/// Detect spend insights in an expense history file
pub fn run_insights(
    analytics: &AnalyticsConfig,
    model_path: &Path,
    file: &Path,
    group_by: Option<&str>,
) -> Result<Vec<Insight>> {
    let group_by = match group_by {
        Some(s) => s.parse::<GroupBy>().map_err(|e| anyhow!(e))?,
        None => analytics.insights.group_by,
    };

    let transactions = load_history(Some(file))?;

    // Only suggested-category grouping needs the categorizer
    let resolver = match group_by {
        GroupBy::SuggestedCategory => {
            CategoryResolver::initialize(&analytics.categorize, Some(model_path))
        }
        _ => CategoryResolver::heuristic(KeywordCategorizer::from_config(&analytics.categorize)),
    };

    let entries = expense_entries(&transactions, group_by, &resolver)?;
    let insights = InsightDetector::from_config(&analytics.insights).detect(&entries)?;
    Ok(insights)
}

pub fn cmd_insights(
    analytics: &AnalyticsConfig,
    model_path: &Path,
    file: &Path,
    group_by: Option<&str>,
    json: bool,
) -> Result<()> {
    let insights = run_insights(analytics, model_path, file, group_by)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "insights": insights }))?
        );
        return Ok(());
    }

    println!();
    if insights.is_empty() {
        println!("   No expenses to analyze.");
        return Ok(());
    }

    for insight in &insights {
        let icon = match insight.kind {
            InsightKind::Anomaly => "⚠️ ",
            InsightKind::Info => "✅",
        };
        println!("   {} {}", icon, insight.message);
        println!("      → {}", insight.action);
    }
    Ok(())
}
