//! Category resolution strategy, chosen once at startup

use std::path::Path;
use std::sync::Arc;

use crate::config::CategorizeConfig;
use crate::error::{Error, Result};
use crate::models::CategoryPrediction;

use super::classifier::TextClassifier;
use super::heuristic::KeywordCategorizer;
use super::naive_bayes::NaiveBayesClassifier;

/// How a model-backed resolver scores its labels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfidenceScoring {
    /// Max class probability; `default` when a scoring call fails
    Probability { default: f64 },
    /// Classifier cannot score; every label gets this value
    Fixed(f64),
}

/// Maps descriptions to categories with a confidence
#[derive(Clone)]
pub enum CategoryResolver {
    /// Trained classifier loaded at startup
    ModelBacked {
        classifier: Arc<dyn TextClassifier>,
        scoring: ConfidenceScoring,
    },
    /// Keyword rules; used when no classifier is available
    Heuristic(KeywordCategorizer),
}

impl CategoryResolver {
    /// Wrap a classifier, querying its confidence capability once
    pub fn model_backed(classifier: Arc<dyn TextClassifier>, default_confidence: f64) -> Self {
        let scoring = if classifier.supports_confidence() {
            ConfidenceScoring::Probability {
                default: default_confidence,
            }
        } else {
            ConfidenceScoring::Fixed(default_confidence)
        };
        Self::ModelBacked {
            classifier,
            scoring,
        }
    }

    pub fn heuristic(categorizer: KeywordCategorizer) -> Self {
        Self::Heuristic(categorizer)
    }

    /// Pick the strategy for this process
    ///
    /// Loads the classifier artifact when a path is given. A missing or unreadable artifact
    /// never prevents startup; the resolver downgrades to keyword rules.
    pub fn initialize(config: &CategorizeConfig, model_path: Option<&Path>) -> Self {
        match model_path.map(load_classifier) {
            Some(Ok(classifier)) => {
                tracing::info!(
                    classifier = classifier.name(),
                    confidence = classifier.supports_confidence(),
                    "Categorizer model loaded"
                );
                Self::model_backed(classifier, config.model_confidence_default)
            }
            Some(Err(Error::ClassificationUnavailable(reason))) => {
                tracing::info!(%reason, "Categorizer model not available, using keyword rules");
                Self::Heuristic(KeywordCategorizer::from_config(config))
            }
            Some(Err(e)) => {
                tracing::error!(error = %e, "Error loading categorizer model, using keyword rules");
                Self::Heuristic(KeywordCategorizer::from_config(config))
            }
            None => {
                tracing::info!("No categorizer model configured, using keyword rules");
                Self::Heuristic(KeywordCategorizer::from_config(config))
            }
        }
    }

    pub fn is_model_backed(&self) -> bool {
        matches!(self, Self::ModelBacked { .. })
    }

    /// Strategy name for logging and status output
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModelBacked { .. } => "model",
            Self::Heuristic(_) => "heuristic",
        }
    }

    /// One prediction per description, in order
    pub fn resolve(&self, descriptions: &[String]) -> Result<Vec<CategoryPrediction>> {
        match self {
            Self::Heuristic(categorizer) => Ok(descriptions
                .iter()
                .map(|d| categorizer.categorize(d))
                .collect()),
            Self::ModelBacked {
                classifier,
                scoring,
            } => {
                if descriptions.is_empty() {
                    return Ok(Vec::new());
                }

                let labels = classifier.predict(descriptions)?;
                if labels.len() != descriptions.len() {
                    return Err(Error::Classifier(format!(
                        "{} returned {} labels for {} descriptions",
                        classifier.name(),
                        labels.len(),
                        descriptions.len()
                    )));
                }

                let confidences = match *scoring {
                    ConfidenceScoring::Fixed(value) => vec![value; labels.len()],
                    ConfidenceScoring::Probability { default } => {
                        score(&**classifier, descriptions, default)
                    }
                };

                Ok(labels
                    .into_iter()
                    .zip(confidences)
                    .map(|(category, confidence)| CategoryPrediction {
                        category,
                        confidence,
                    })
                    .collect())
            }
        }
    }
}

/// Max probability per description, or `default` for every item if scoring fails
fn score(classifier: &dyn TextClassifier, descriptions: &[String], default: f64) -> Vec<f64> {
    match classifier.predict_proba(descriptions) {
        Ok(distributions) if distributions.len() == descriptions.len() => distributions
            .iter()
            .map(|dist| dist.iter().cloned().fold(f64::NEG_INFINITY, f64::max))
            .map(|max| if max.is_finite() { max } else { default })
            .collect(),
        Ok(distributions) => {
            tracing::warn!(
                classifier = classifier.name(),
                expected = descriptions.len(),
                got = distributions.len(),
                "Confidence scoring returned wrong row count, using default confidence"
            );
            vec![default; descriptions.len()]
        }
        Err(e) => {
            tracing::warn!(
                classifier = classifier.name(),
                error = %e,
                "Confidence scoring failed, using default confidence"
            );
            vec![default; descriptions.len()]
        }
    }
}

/// Load the classifier artifact
///
/// Returns `ClassificationUnavailable` when no artifact exists at `path`.
pub fn load_classifier(path: &Path) -> Result<Arc<dyn TextClassifier>> {
    if !path.exists() {
        return Err(Error::ClassificationUnavailable(format!(
            "no artifact at {}",
            path.display()
        )));
    }
    let model = NaiveBayesClassifier::load(path)?;
    Ok(Arc::new(model))
}
