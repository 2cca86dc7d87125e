//! Shared command utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use biztrack_core::config::AnalyticsConfig;
use biztrack_core::import::load_transactions;
use biztrack_core::models::Transaction;

/// Environment variable naming the analytics config file
pub const CONFIG_ENV: &str = "BIZTRACK_CONFIG";

/// Environment variable naming the categorizer artifact
pub const MODEL_PATH_ENV: &str = "BIZTRACK_MODEL_PATH";

/// Categorizer artifact location when nothing else is configured
pub const DEFAULT_MODEL_PATH: &str = "models/categorizer.json";

/// Config file: `--config`, then BIZTRACK_CONFIG, else none (data dir / embedded default)
pub fn config_path(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf).or_else(|| {
        std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

/// Categorizer artifact: `--model`, then BIZTRACK_MODEL_PATH, then the default location
pub fn model_path(flag: Option<&Path>) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| {
            std::env::var_os(MODEL_PATH_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH))
}

/// Load and validate the analytics configuration
pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    let config = AnalyticsConfig::load(path).context("Failed to load analytics config")?;
    tracing::debug!(
        path = ?path,
        threshold = config.insights.anomaly_threshold,
        group_by = config.insights.group_by.as_str(),
        "Analytics config loaded"
    );
    Ok(config)
}

/// Read a history file, or an empty history when no file was given
pub fn load_history(path: Option<&Path>) -> Result<Vec<Transaction>> {
    match path {
        Some(p) => load_transactions(p)
            .with_context(|| format!("Failed to read transactions from {}", p.display())),
        None => Ok(Vec::new()),
    }
}
