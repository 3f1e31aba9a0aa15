//! Prediction result types.
//!
//! Represents the terminal output of the scoring engine.

use serde::Serialize;

use super::risk::serialize_round3;
use super::{
    adjustment_total, generate_advice, project_trajectory, Advice, InputRecord, RiskSet,
    TRAJECTORY_LEN,
};

/// Diagnostic values behind the cardio risk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionMeta {
    /// Raw classifier probability before rule adjustment
    pub base_cardio_prob: f64,

    /// Sum of the lifestyle rule contributions
    #[serde(serialize_with = "serialize_round3")]
    pub rule_adjustment_sum: f64,
}

/// Complete prediction for one input record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Composite score in [0, 100], one decimal
    pub health_score: f64,

    /// Cardio, mental and sleep risk
    pub risks: RiskSet,

    /// Projected score for the next five steps, starting with the current score
    pub trajectory: [f64; TRAJECTORY_LEN],

    /// Recommendations in trigger order
    pub advice: Vec<Advice>,

    pub meta: PredictionMeta,
}

impl PredictionResult {
    /// Build the full result from a baseline probability.
    ///
    /// The caller is responsible for `baseline` being a finite probability.
    #[must_use]
    pub fn assemble(baseline: f64, input: &InputRecord) -> Self {
        let adjustment = adjustment_total(input);
        let risks = RiskSet::compute(baseline, adjustment, input);

        let raw_score = risks.raw_health_score();
        debug_assert!(
            (-1e-9..=100.0 + 1e-9).contains(&raw_score),
            "health score {raw_score} escaped [0, 100]"
        );

        Self {
            health_score: risks.health_score(),
            risks,
            trajectory: project_trajectory(raw_score, risks.cardio),
            advice: generate_advice(input),
            meta: PredictionMeta {
                base_cardio_prob: baseline,
                rule_adjustment_sum: adjustment,
            },
        }
    }

    /// Advice as plain message strings.
    #[must_use]
    pub fn advice_messages(&self) -> Vec<&'static str> {
        self.advice.iter().map(Advice::message).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn executive() -> InputRecord {
        InputRecord {
            age: 45,
            sex: 1,
            bp_systolic: 138.0,
            cholesterol: 220.0,
            bmi: 29.4,
            smoking: 1,
            alcohol_level: 2,
            exercise_freq: 1,
            sleep_hours: 5.5,
            stress_score: 7,
        }
    }

    #[test]
    fn test_assemble_high_risk_profile() {
        let result = PredictionResult::assemble(0.3, &executive());

        assert!((result.meta.rule_adjustment_sum - 0.44).abs() < 1e-9);
        assert_eq!(result.meta.base_cardio_prob, 0.3);
        assert!((result.risks.cardio - 0.74).abs() < 1e-9);

        // 100 * (1 - (0.6*0.74 + 0.25*0.40 + 0.15*0.1)) = 44.1
        assert_eq!(result.health_score, 44.1);
        assert_eq!(result.trajectory, [44.1, 40.4, 36.7, 33.0, 29.3]);
        assert_eq!(result.advice.len(), 5);
        assert_eq!(
            result.advice_messages()[1],
            "Quit smoking to reduce cardio risk."
        );
    }

    #[test]
    fn test_trajectory_rounds_exact_values() {
        let input = InputRecord {
            age: 30,
            sex: 1,
            bp_systolic: 120.0,
            cholesterol: 180.0,
            bmi: 23.5,
            smoking: 0,
            alcohol_level: 0,
            exercise_freq: 1,
            sleep_hours: 5.5,
            stress_score: 5,
        };
        let result = PredictionResult::assemble(0.2, &input);

        // 71.2 - 1.65 lands just below 69.55
        assert_eq!(result.health_score, 71.2);
        assert_eq!(result.trajectory, [71.2, 69.5, 67.9, 66.2, 64.6]);
    }

    #[test]
    fn test_assemble_saturated_cardio() {
        let result = PredictionResult::assemble(0.95, &executive());
        assert_eq!(result.risks.cardio, 1.0);
        assert_eq!(result.meta.base_cardio_prob, 0.95);
    }

    #[test]
    fn test_serialized_shape() {
        let result = PredictionResult::assemble(0.3, &executive());
        let json = serde_json::to_value(&result).expect("serialize");

        assert_eq!(json["health_score"], serde_json::json!(44.1));
        assert_eq!(json["risks"]["cardio"], serde_json::json!(0.74));
        assert_eq!(json["risks"]["mental"], serde_json::json!(0.4));
        assert_eq!(json["risks"]["sleep"], serde_json::json!(0.1));
        assert_eq!(json["meta"]["rule_adjustment_sum"], serde_json::json!(0.44));
        assert_eq!(json["trajectory"].as_array().map(Vec::len), Some(5));
        assert_eq!(
            json["advice"][0],
            serde_json::json!("Maintain a healthy weight to lower heart risk.")
        );
    }
}
