//! Lifestyle rule adjustments.
//!
//! The baseline classifier only sees age, sex, blood pressure and cholesterol.
//! These rules add a scalar correction for the lifestyle factors it cannot see.

use serde::Serialize;

use super::InputRecord;

/// Lifestyle factor contributing to the rule adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Bmi,
    Smoking,
    Alcohol,
    Exercise,
    Sleep,
    Stress,
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bmi => write!(f, "bmi"),
            Self::Smoking => write!(f, "smoking"),
            Self::Alcohol => write!(f, "alcohol"),
            Self::Exercise => write!(f, "exercise"),
            Self::Sleep => write!(f, "sleep"),
            Self::Stress => write!(f, "stress"),
        }
    }
}

/// One factor's additive contribution to the cardio risk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RuleContribution {
    pub factor: RiskFactor,
    pub value: f64,
}

fn bmi_contribution(bmi: f64) -> f64 {
    if bmi >= 30.0 {
        0.10
    } else if bmi >= 25.0 {
        0.05
    } else {
        0.0
    }
}

fn smoking_contribution(smoking: u8) -> f64 {
    if smoking == 1 {
        0.15
    } else {
        0.0
    }
}

// Level 3 carries no adjustment. Kept as-is pending product confirmation.
fn alcohol_contribution(level: u8) -> f64 {
    match level {
        2 => 0.07,
        1 => 0.03,
        _ => 0.0,
    }
}

// Two sessions a week is neutral.
fn exercise_contribution(freq: u8) -> f64 {
    match freq {
        0 => 0.10,
        1 => 0.05,
        2 => 0.0,
        _ => -0.05,
    }
}

fn sleep_contribution(hours: f64) -> f64 {
    if hours < 6.0 {
        0.05
    } else if hours > 9.0 {
        0.03
    } else {
        0.0
    }
}

fn stress_contribution(score: u8) -> f64 {
    if score >= 7 {
        0.07
    } else if score >= 4 {
        0.03
    } else {
        0.0
    }
}

/// Evaluate the six lifestyle rules in fixed order.
#[must_use]
pub fn rule_contributions(input: &InputRecord) -> [RuleContribution; 6] {
    [
        RuleContribution {
            factor: RiskFactor::Bmi,
            value: bmi_contribution(input.bmi),
        },
        RuleContribution {
            factor: RiskFactor::Smoking,
            value: smoking_contribution(input.smoking),
        },
        RuleContribution {
            factor: RiskFactor::Alcohol,
            value: alcohol_contribution(input.alcohol_level),
        },
        RuleContribution {
            factor: RiskFactor::Exercise,
            value: exercise_contribution(input.exercise_freq),
        },
        RuleContribution {
            factor: RiskFactor::Sleep,
            value: sleep_contribution(input.sleep_hours),
        },
        RuleContribution {
            factor: RiskFactor::Stress,
            value: stress_contribution(input.stress_score),
        },
    ]
}

/// Sum of all rule contributions. May be negative.
#[must_use]
pub fn adjustment_total(input: &InputRecord) -> f64 {
    rule_contributions(input)
        .iter()
        .fold(0.0, |acc, c| acc + c.value)
}
