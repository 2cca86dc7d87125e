//! Categorize command implementation

use std::path::Path;

use anyhow::{bail, Result};

use biztrack_core::categorize::CategoryResolver;
use biztrack_core::config::AnalyticsConfig;
use biztrack_core::models::CategoryPrediction;

use super::{load_history, truncate};

/// Resolve categories for the given descriptions plus any from a transaction file
pub fn run_categorize(
    analytics: &AnalyticsConfig,
    model_path: &Path,
    mut descriptions: Vec<String>,
    file: Option<&Path>,
) -> Result<Vec<(String, CategoryPrediction)>> {
    descriptions.extend(
        load_history(file)?
            .iter()
            .map(|tx| tx.description_text().to_string()),
    );
    if descriptions.is_empty() {
        bail!("Nothing to categorize: pass descriptions or --file");
    }

    let resolver = CategoryResolver::initialize(&analytics.categorize, Some(model_path));
    let predictions = resolver.resolve(&descriptions)?;
    Ok(descriptions.into_iter().zip(predictions).collect())
}

pub fn cmd_categorize(
    analytics: &AnalyticsConfig,
    model_path: &Path,
    descriptions: Vec<String>,
    file: Option<&Path>,
    json: bool,
) -> Result<()> {
    let results = run_categorize(analytics, model_path, descriptions, file)?;

    if json {
        let predictions: Vec<serde_json::Value> = results
            .iter()
            .map(|(description, p)| {
                serde_json::json!({
                    "description": description,
                    "suggested_category": p.category,
                    "confidence": p.confidence,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "predictions": predictions }))?
        );
        return Ok(());
    }

    println!();
    println!("   {:<40} {:<12} {:>10}", "Description", "Category", "Confidence");
    println!("   ─────────────────────────────────────────────────────────────────");
    for (description, p) in &results {
        println!(
            "   {:<40} {:<12} {:>9.0}%",
            truncate(description, 40),
            p.category,
            p.confidence * 100.0
        );
    }
    Ok(())
}
