//! Transaction categorization
//!
//! A `CategoryResolver` is built once per process. When a trained classifier artifact is
//! present it is model-backed (with probability-based confidence when the classifier can
//! score); otherwise it falls back to ordered keyword rules with a fixed low confidence.

pub mod classifier;
pub mod heuristic;
pub mod naive_bayes;
pub mod resolver;
pub mod training;

pub use classifier::TextClassifier;
pub use heuristic::{KeywordCategorizer, DEFAULT_CATEGORY};
pub use naive_bayes::{tokenize, NaiveBayesClassifier, DEFAULT_ALPHA};
pub use resolver::{load_classifier, CategoryResolver, ConfidenceScoring};
pub use training::{load_labeled_csv, seed_examples};
