//! Error types for BizTrack

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Too little history to fit a seasonal model; callers substitute a fallback forecast
    #[error("Insufficient data: {points} point(s), need at least {minimum}")]
    InsufficientData { points: usize, minimum: usize },

    #[error("Forecasting failure: {0}")]
    ForecastingFailure(String),

    /// No trained classifier is available; categorization downgrades to heuristics
    #[error("Classification unavailable: {0}")]
    ClassificationUnavailable(String),

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Whether this error should be answered with a fallback forecast instead of an error payload
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Error::InsufficientData { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
