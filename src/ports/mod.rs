//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the scoring engine and the pre-trained classifier artifact.

mod classifier;

pub use classifier::{BaselineClassifier, ClassifierLoader, ModelError};
