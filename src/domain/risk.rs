//! Composite risks, health score and trajectory.
//!
//! Cardio risk is the classifier baseline plus the rule adjustment, clamped to
//! [0, 1]. Mental and sleep risk come from the stress and sleep fields only.

use serde::{Serialize, Serializer};

use super::InputRecord;

/// Number of points in a health-score trajectory.
pub const TRAJECTORY_LEN: usize = 5;

const CARDIO_WEIGHT: f64 = 0.6;
const MENTAL_WEIGHT: f64 = 0.25;
const SLEEP_WEIGHT: f64 = 0.15;

/// Per-step decline of the trajectory for each unit of cardio risk.
const TRAJECTORY_DECLINE_PER_CARDIO: f64 = 5.0;

/// Round to `places` decimals, ties to even.
///
/// Rounds the exact binary value, so `86.65` (stored as 86.650000000000005...)
/// becomes 86.7. Scaling by a power of ten first would lose that.
#[must_use]
pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.places$}").parse().unwrap_or(value)
}

pub(crate) fn serialize_round3<S: Serializer>(value: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(round_to(*value, 3))
}

/// Risk probabilities, each within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskSet {
    #[serde(serialize_with = "serialize_round3")]
    pub cardio: f64,

    #[serde(serialize_with = "serialize_round3")]
    pub mental: f64,

    #[serde(serialize_with = "serialize_round3")]
    pub sleep: f64,
}

impl RiskSet {
    /// Combine the baseline probability and rule adjustment into the risk set.
    #[must_use]
    pub fn compute(baseline: f64, adjustment: f64, input: &InputRecord) -> Self {
        let short_sleep = input.sleep_hours < 6.0;

        let cardio = (baseline + adjustment).clamp(0.0, 1.0);
        let mental = (0.05 * f64::from(input.stress_score) + if short_sleep { 0.05 } else { 0.0 })
            .min(1.0);
        // Both constants are below 1; the clamp never triggers.
        let sleep = (if short_sleep { 0.1_f64 } else { 0.02 }).min(1.0);

        Self {
            cardio,
            mental,
            sleep,
        }
    }

    /// Unrounded composite score in [0, 100].
    #[must_use]
    pub fn raw_health_score(&self) -> f64 {
        100.0
            * (1.0
                - (CARDIO_WEIGHT * self.cardio
                    + MENTAL_WEIGHT * self.mental
                    + SLEEP_WEIGHT * self.sleep))
    }

    /// Composite score rounded to one decimal.
    #[must_use]
    pub fn health_score(&self) -> f64 {
        round_to(self.raw_health_score(), 1)
    }

    /// Interpretation of each risk, in (cardio, mental, sleep) order.
    #[must_use]
    pub fn levels(&self) -> [(&'static str, RiskLevel); 3] {
        [
            ("cardio", RiskLevel::from_probability(self.cardio)),
            ("mental", RiskLevel::from_probability(self.mental)),
            ("sleep", RiskLevel::from_probability(self.sleep)),
        ]
    }
}

/// Linear projection of the score, declining by `cardio * 5` per step.
///
/// Not clamped: a high cardio risk can drive later points below zero.
#[must_use]
pub fn project_trajectory(health_score: f64, cardio: f64) -> [f64; TRAJECTORY_LEN] {
    let step = cardio * TRAJECTORY_DECLINE_PER_CARDIO;
    std::array::from_fn(|i| round_to(health_score - i as f64 * step, 1))
}

/// Risk level classification for a single probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    #[must_use]
    pub fn from_probability(p: f64) -> Self {
        if p > 0.5 {
            Self::High
        } else if p > 0.3 {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Coarse band for a 0-100 health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Good,
    Fair,
    Concerning,
    Poor,
}

impl ScoreBand {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Good
        } else if score >= 60.0 {
            Self::Fair
        } else if score >= 40.0 {
            Self::Concerning
        } else {
            Self::Poor
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Good => "Good - keep up current habits",
            Self::Fair => "Fair - some factors worth addressing",
            Self::Concerning => "Concerning - several risk factors present",
            Self::Poor => "Poor - consult a clinician",
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Good => write!(f, "GOOD"),
            Self::Fair => write!(f, "FAIR"),
            Self::Concerning => write!(f, "CONCERNING"),
            Self::Poor => write!(f, "POOR"),
        }
    }
}
