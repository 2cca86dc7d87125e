//! Text classification capability

use crate::error::{Error, Result};

/// A trained text classifier
///
/// Confidence scoring is optional. Callers check `supports_confidence` once, when they
/// take ownership of the classifier, rather than probing `predict_proba` per request.
pub trait TextClassifier: Send + Sync {
    /// Short identifier for logging
    fn name(&self) -> &str;

    /// Predict one label per text, in order
    fn predict(&self, texts: &[String]) -> Result<Vec<String>>;

    /// Whether `predict_proba` returns real distributions
    fn supports_confidence(&self) -> bool {
        false
    }

    /// Class probability distribution per text, in order
    fn predict_proba(&self, _texts: &[String]) -> Result<Vec<Vec<f64>>> {
        Err(Error::Classifier(format!(
            "{} does not support confidence scoring",
            self.name()
        )))
    }
}
