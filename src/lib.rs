//! # HealthTwin
//!
//! Deterministic health-risk scoring engine.
//!
//! This crate provides:
//! - Baseline cardiovascular probability from a pre-trained classifier
//! - Additive lifestyle rule adjustments on top of the baseline
//! - Composite health score, five-point trajectory and rule-triggered advice
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types and formulas (input record, rules, risks, advice)
//! - `ports`: Trait definitions for the classifier boundary
//! - `adapters`: Concrete implementations (JSON logistic-regression artifact)
//! - `application`: Use cases orchestrating domain and ports
//! - `config`: Environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::HealthPredictor;
pub use domain::{InputRecord, PredictionResult, RiskSet};

/// Result type for HealthTwin operations
pub type Result<T> = std::result::Result<T, TwinError>;

/// Main error type for HealthTwin
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TwinError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Computation error: {0}")]
    Computation(String),
}

impl From<ports::ModelError> for TwinError {
    fn from(e: ports::ModelError) -> Self {
        match e {
            ports::ModelError::Inference(msg) => Self::Computation(msg),
            other => Self::ModelUnavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ModelError;

    #[test]
    fn test_model_error_mapping() {
        let err: TwinError = ModelError::NotFound("models/heart_model.json".into()).into();
        assert!(matches!(err, TwinError::ModelUnavailable(_)));

        let err: TwinError = ModelError::Corrupt("bad json".into()).into();
        assert!(matches!(err, TwinError::ModelUnavailable(_)));

        let err: TwinError = ModelError::Integrity("hash mismatch".into()).into();
        assert!(matches!(err, TwinError::ModelUnavailable(_)));

        let err: TwinError = ModelError::Inference("NaN".into()).into();
        assert_eq!(err, TwinError::Computation("NaN".into()));
    }
}
