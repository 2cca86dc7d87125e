//! Categorizer training and configuration commands

use std::path::Path;

use anyhow::{bail, Context, Result};

use biztrack_core::categorize::{load_labeled_csv, seed_examples, NaiveBayesClassifier};
use biztrack_core::config::AnalyticsConfig;

/// Description used for the post-training sanity check
const SANITY_DESCRIPTION: &str = "Supplies for the shop";

/// Train a categorizer and write its artifact to `output`
pub fn train_categorizer(
    data: Option<&Path>,
    output: &Path,
    alpha: f64,
) -> Result<NaiveBayesClassifier> {
    if !(alpha > 0.0 && alpha.is_finite()) {
        bail!("--alpha must be a positive number");
    }

    let examples = match data {
        Some(path) => load_labeled_csv(path)
            .with_context(|| format!("Failed to read training data from {}", path.display()))?,
        None => seed_examples(),
    };

    tracing::info!(examples = examples.len(), alpha, "Training categorizer");
    let model = NaiveBayesClassifier::train(&examples, alpha)?;
    model
        .save(output)
        .with_context(|| format!("Failed to save categorizer to {}", output.display()))?;
    Ok(model)
}

pub fn cmd_train_categorizer(data: Option<&Path>, output: &Path, alpha: f64) -> Result<()> {
    println!("🧠 Training categorizer...");
    match data {
        Some(path) => println!("   Data: {}", path.display()),
        None => println!("   Data: built-in seed set"),
    }

    let model = train_categorizer(data, output, alpha)?;

    println!("   Labels: {}", model.labels().join(", "));
    println!("   Vocabulary: {} terms", model.vocabulary_size());
    println!("   ✅ Saved to {}", output.display());
    println!();
    println!(
        "   Test prediction for '{}': {}",
        SANITY_DESCRIPTION,
        model.predict_one(SANITY_DESCRIPTION)
    );
    Ok(())
}

/// Print the effective analytics configuration as TOML
pub fn cmd_config(path: Option<&Path>) -> Result<()> {
    let config = AnalyticsConfig::load(path).context("Failed to load analytics config")?;
    match path {
        Some(p) => println!("# Source: {}", p.display()),
        None => println!("# Source: data dir override or embedded default"),
    }
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
