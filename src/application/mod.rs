//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the scoring use case.

mod model_handle;
mod predictor;

pub use model_handle::LazyClassifier;
pub use predictor::HealthPredictor;
