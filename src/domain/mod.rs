//! Domain layer: Core scoring types and formulas.
//!
//! This module contains pure Rust types with no I/O.
//! Every function here is deterministic given its arguments.

mod advice;
mod input;
mod prediction;
mod risk;
mod rules;

pub use advice::{generate_advice, Advice};
pub use input::{FeatureVector, InputRecord, FEATURE_NAMES, INPUT_FIELDS};
pub use prediction::{PredictionMeta, PredictionResult};
pub use risk::{
    project_trajectory, round_to, RiskLevel, RiskSet, ScoreBand, TRAJECTORY_LEN,
};
pub use rules::{adjustment_total, rule_contributions, RiskFactor, RuleContribution};
