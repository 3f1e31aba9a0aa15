//! Adapters layer: Concrete implementations of ports.
//!
//! - `logistic`: JSON-exported logistic-regression pipeline

pub mod logistic;
