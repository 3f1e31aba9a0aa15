//! Classifier port: Traits for the baseline cardiovascular classifier.
//!
//! This trait abstracts the trained model artifact from the scoring logic.

use crate::domain::FeatureVector;

/// Errors that can occur while loading or querying the classifier.
///
/// `Clone` so a cached load failure can be handed to every caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Model artifact not found: {0}")]
    NotFound(String),

    #[error("Model artifact is corrupt: {0}")]
    Corrupt(String),

    #[error("Model integrity check failed: {0}")]
    Integrity(String),

    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Trait for a fitted binary classifier.
///
/// Implementations are immutable after construction and safe to share
/// across threads for read-only inference.
pub trait BaselineClassifier: Send + Sync {
    /// Probability of the positive class (cardiovascular event).
    ///
    /// # Errors
    /// Returns `ModelError::Inference` if the output is not a finite
    /// probability.
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ModelError>;
}

/// Trait for loading a classifier artifact.
pub trait ClassifierLoader: Send + Sync {
    /// Classifier type produced by this loader.
    type Classifier: BaselineClassifier;

    /// Load the classifier.
    ///
    /// # Errors
    /// Returns `ModelError::NotFound`, `Corrupt` or `Integrity` when the
    /// artifact cannot be used.
    fn load(&self) -> Result<Self::Classifier, ModelError>;
}
