//! Multinomial naive-Bayes text classifier over TF-IDF features
//!
//! Features are lowercase word unigrams and bigrams (English stop-words removed), weighted
//! by smoothed inverse document frequency and L2-normalized per description. The
//! trained model serializes to JSON so it can be shipped as an artifact and loaded at
//! startup.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::classifier::TextClassifier;

/// Artifact format version
pub const ARTIFACT_VERSION: u32 = 1;

/// Default additive smoothing
pub const DEFAULT_ALPHA: f64 = 0.1;

const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "been",
    "but", "by", "can", "could", "did", "do", "does", "each", "for", "from", "had", "has",
    "have", "he", "her", "his", "how", "if", "in", "into", "is", "it", "its", "main", "may",
    "more", "most", "my", "new", "no", "not", "of", "on", "or", "our", "out", "over", "per",
    "she", "so", "some", "such", "than", "that", "the", "their", "them", "then", "there",
    "these", "they", "this", "those", "to", "up", "very", "was", "we", "were", "what", "when",
    "which", "while", "who", "will", "with", "would", "you", "your",
];

fn token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("valid regex"))
}

/// Unigram and bigram features of a description
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let words: Vec<&str> = token_regex()
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|w| !STOP_WORDS.contains(w))
        .collect();

    let mut features: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    features.extend(words.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    features
}

/// Trained multinomial naive-Bayes classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayesClassifier {
    version: u32,
    alpha: f64,
    /// Class labels, sorted
    labels: Vec<String>,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    class_log_prior: Vec<f64>,
    /// `[class][feature]` log P(feature | class)
    feature_log_prob: Vec<Vec<f64>>,
}

impl NaiveBayesClassifier {
    /// Train on `(description, label)` pairs
    pub fn train(examples: &[(String, String)], alpha: f64) -> Result<Self> {
        if examples.is_empty() {
            return Err(Error::Classifier("no training examples".to_string()));
        }
        if alpha <= 0.0 {
            return Err(Error::Classifier(format!(
                "smoothing alpha must be positive, got {}",
                alpha
            )));
        }

        let labels: Vec<String> = examples
            .iter()
            .map(|(_, label)| label.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let label_index: HashMap<&str, usize> = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.as_str(), i))
            .collect();

        let docs: Vec<Vec<String>> = examples.iter().map(|(text, _)| tokenize(text)).collect();

        // Vocabulary in sorted order for a stable artifact
        let terms: BTreeSet<&str> = docs.iter().flatten().map(|t| t.as_str()).collect();
        if terms.is_empty() {
            return Err(Error::Classifier(
                "training examples contain no usable words".to_string(),
            ));
        }
        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i))
            .collect();

        // Smoothed idf: ln((1 + n) / (1 + df)) + 1
        let n_docs = docs.len() as f64;
        let mut df = vec![0usize; vocabulary.len()];
        for doc in &docs {
            let unique: BTreeSet<usize> = doc.iter().map(|t| vocabulary[t]).collect();
            for idx in unique {
                df[idx] += 1;
            }
        }
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n_docs) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let mut class_counts = vec![0usize; labels.len()];
        let mut feature_counts = vec![vec![0.0; vocabulary.len()]; labels.len()];
        for ((_, label), doc) in examples.iter().zip(&docs) {
            let class = label_index[label.as_str()];
            class_counts[class] += 1;
            for (idx, weight) in weigh(doc, &vocabulary, &idf) {
                feature_counts[class][idx] += weight;
            }
        }

        let class_log_prior = class_counts
            .iter()
            .map(|&c| (c as f64 / n_docs).ln())
            .collect();

        let vocab_len = vocabulary.len() as f64;
        let feature_log_prob = feature_counts
            .iter()
            .map(|counts| {
                let total: f64 = counts.iter().sum::<f64>() + alpha * vocab_len;
                counts.iter().map(|c| ((c + alpha) / total).ln()).collect()
            })
            .collect();

        tracing::debug!(
            examples = examples.len(),
            classes = labels.len(),
            features = vocabulary.len(),
            "Trained naive-Bayes categorizer"
        );

        Ok(Self {
            version: ARTIFACT_VERSION,
            alpha,
            labels,
            vocabulary,
            idf,
            class_log_prior,
            feature_log_prob,
        })
    }

    /// Class labels known to the model
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Unnormalized log-likelihood per class
    fn joint_log_likelihood(&self, text: &str) -> Vec<f64> {
        let features = weigh(&tokenize(text), &self.vocabulary, &self.idf);
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior
                    + features
                        .iter()
                        .map(|(idx, weight)| weight * log_probs[*idx])
                        .sum::<f64>()
            })
            .collect()
    }

    /// Most likely label for one description (first label wins ties)
    pub fn predict_one(&self, text: &str) -> &str {
        let jll = self.joint_log_likelihood(text);
        let best = jll
            .iter()
            .enumerate()
            .fold(0, |best, (i, v)| if *v > jll[best] { i } else { best });
        &self.labels[best]
    }

    /// Probability distribution over `labels()` for one description
    pub fn predict_proba_one(&self, text: &str) -> Vec<f64> {
        let jll = self.joint_log_likelihood(text);
        let max = jll.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = jll.iter().map(|v| (v - max).exp()).collect();
        let sum: f64 = exp.iter().sum();
        exp.iter().map(|e| e / sum).collect()
    }

    /// Write the model as a JSON artifact (atomically, via a temp file in the same directory)
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(d) if !d.as_os_str().is_empty() => d,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, self)?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }

    /// Read a JSON artifact
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&content)?;
        model.check()?;
        Ok(model)
    }

    /// Structural consistency of a deserialized model
    fn check(&self) -> Result<()> {
        if self.version != ARTIFACT_VERSION {
            return Err(Error::Classifier(format!(
                "unsupported artifact version {} (expected {})",
                self.version, ARTIFACT_VERSION
            )));
        }
        let n_features = self.vocabulary.len();
        let consistent = !self.labels.is_empty()
            && self.class_log_prior.len() == self.labels.len()
            && self.feature_log_prob.len() == self.labels.len()
            && self.idf.len() == n_features
            && self.feature_log_prob.iter().all(|row| row.len() == n_features)
            && self.vocabulary.values().all(|&idx| idx < n_features);
        if !consistent {
            return Err(Error::Classifier(
                "artifact shapes are inconsistent".to_string(),
            ));
        }
        Ok(())
    }
}

impl TextClassifier for NaiveBayesClassifier {
    fn name(&self) -> &str {
        "naive_bayes"
    }

    fn predict(&self, texts: &[String]) -> Result<Vec<String>> {
        Ok(texts
            .iter()
            .map(|t| self.predict_one(t).to_string())
            .collect())
    }

    fn supports_confidence(&self) -> bool {
        true
    }

    fn predict_proba(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
        Ok(texts.iter().map(|t| self.predict_proba_one(t)).collect())
    }
}

/// L2-normalized TF-IDF weights for in-vocabulary features
fn weigh(
    features: &[String],
    vocabulary: &HashMap<String, usize>,
    idf: &[f64],
) -> Vec<(usize, f64)> {
    let mut counts: HashMap<usize, f64> = HashMap::new();
    for feature in features {
        if let Some(&idx) = vocabulary.get(feature) {
            *counts.entry(idx).or_insert(0.0) += 1.0;
        }
    }

    let mut weighted: Vec<(usize, f64)> = counts
        .into_iter()
        .map(|(idx, tf)| (idx, tf * idf[idx]))
        .collect();
    weighted.sort_by_key(|(idx, _)| *idx);

    let norm = weighted.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, w) in &mut weighted {
            *w /= norm;
        }
    }
    weighted
}
