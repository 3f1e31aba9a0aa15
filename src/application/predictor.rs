//! Prediction service: Orchestrates health-risk scoring.
//!
//! This service coordinates:
//! - Feature mapping
//! - Baseline classifier inference
//! - Rule adjustment, composite risks, score, trajectory and advice

use crate::domain::{InputRecord, PredictionResult};
use crate::ports::{BaselineClassifier, ClassifierLoader, ModelError};
use crate::TwinError;

use super::LazyClassifier;

/// Service for scoring input records.
///
/// Holds no mutable state besides the lazily-loaded classifier, so a single
/// instance can be shared behind an `Arc` and called from many threads.
pub struct HealthPredictor<L>
where
    L: ClassifierLoader,
{
    classifier: LazyClassifier<L>,
}

impl<L> HealthPredictor<L>
where
    L: ClassifierLoader,
{
    /// Create a new predictor. The classifier is loaded on first use.
    pub fn new(loader: L) -> Self {
        Self {
            classifier: LazyClassifier::new(loader),
        }
    }

    /// Load the classifier now instead of on the first prediction.
    ///
    /// # Errors
    /// Returns `TwinError::ModelUnavailable` if the artifact cannot be loaded.
    pub fn warm_up(&self) -> Result<(), TwinError> {
        self.classifier.get().map(|_| ()).map_err(TwinError::from)
    }

    /// Whether the classifier has been loaded successfully.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.classifier.is_loaded()
    }

    /// Score one input record.
    ///
    /// # Errors
    /// - `TwinError::InvalidInput` if a numeric field is not finite
    /// - `TwinError::ModelUnavailable` if the classifier cannot be loaded
    /// - `TwinError::Computation` if the classifier output is not a finite
    ///   probability
    pub fn predict(&self, input: &InputRecord) -> Result<PredictionResult, TwinError> {
        input.ensure_finite()?;

        let classifier = self.classifier.get()?;
        let features = input.features();
        let baseline = classifier.predict_probability(&features)?;

        if !baseline.is_finite() || !(0.0..=1.0).contains(&baseline) {
            return Err(ModelError::Inference(format!(
                "baseline probability {baseline} is not in [0, 1]"
            ))
            .into());
        }

        let result = PredictionResult::assemble(baseline, input);

        tracing::debug!(
            "Prediction complete: health_score={:.1}, cardio={:.3}, advice={}",
            result.health_score,
            result.risks.cardio,
            result.advice.len()
        );

        Ok(result)
    }

    /// Parse a JSON input record and score it.
    ///
    /// # Errors
    /// Same as [`HealthPredictor::predict`], plus `TwinError::InvalidInput`
    /// for malformed JSON or missing fields.
    pub fn predict_json(&self, json: &str) -> Result<PredictionResult, TwinError> {
        let input = InputRecord::from_json_str(json)?;
        self.predict(&input)
    }
}
