//! Input record for health-risk scoring.
//!
//! Lifestyle and clinical fields as received from the boundary, plus the
//! feature mapping into the schema the baseline classifier was trained on.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::TwinError;

/// Validated lifestyle/clinical input for one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    /// Age in years (18-120)
    pub age: u8,

    /// Sex: 0 = female, 1 = male
    pub sex: u8,

    /// Systolic blood pressure in mmHg (70-250)
    pub bp_systolic: f64,

    /// Total cholesterol in mg/dL (100-500)
    pub cholesterol: f64,

    /// Body mass index (15-50)
    pub bmi: f64,

    /// Smoking: 0 = no, 1 = yes
    pub smoking: u8,

    /// Alcohol consumption level (0-3)
    pub alcohol_level: u8,

    /// Exercise sessions per week (0-7)
    pub exercise_freq: u8,

    /// Average sleep per night in hours (3-12)
    pub sleep_hours: f64,

    /// Self-reported stress (1-10)
    pub stress_score: u8,
}

/// Required input fields, in schema order.
pub const INPUT_FIELDS: [&str; 10] = [
    "age",
    "sex",
    "bp_systolic",
    "cholesterol",
    "bmi",
    "smoking",
    "alcohol_level",
    "exercise_freq",
    "sleep_hours",
    "stress_score",
];

/// Feature names expected by the baseline classifier, in column order.
pub const FEATURE_NAMES: [&str; 4] = ["age", "sex", "trestbps", "chol"];

/// Classifier-facing view of an [`InputRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    pub age: f64,
    pub sex: f64,
    pub trestbps: f64,
    pub chol: f64,
}

impl FeatureVector {
    /// Features as a fixed array in [`FEATURE_NAMES`] order.
    #[must_use]
    pub fn to_array(&self) -> [f64; 4] {
        [self.age, self.sex, self.trestbps, self.chol]
    }
}

/// Accepts `30` and `30.0`; rejects fractions and values outside `u8`.
fn whole_number<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(v) if v.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&v) => {
            Ok(Some(v as u8))
        }
        Some(v) => Err(D::Error::custom(format!(
            "expected a whole number between 0 and 255, got {v}"
        ))),
    }
}

/// Deserialization target where every field may be absent.
#[derive(Debug, Default, Deserialize)]
struct PartialInputRecord {
    #[serde(default, deserialize_with = "whole_number")]
    age: Option<u8>,
    #[serde(default, deserialize_with = "whole_number")]
    sex: Option<u8>,
    bp_systolic: Option<f64>,
    cholesterol: Option<f64>,
    bmi: Option<f64>,
    #[serde(default, deserialize_with = "whole_number")]
    smoking: Option<u8>,
    #[serde(default, deserialize_with = "whole_number")]
    alcohol_level: Option<u8>,
    #[serde(default, deserialize_with = "whole_number")]
    exercise_freq: Option<u8>,
    sleep_hours: Option<f64>,
    #[serde(default, deserialize_with = "whole_number")]
    stress_score: Option<u8>,
}

impl TryFrom<PartialInputRecord> for InputRecord {
    type Error = TwinError;

    fn try_from(p: PartialInputRecord) -> Result<Self, Self::Error> {
        let present = [
            p.age.is_some(),
            p.sex.is_some(),
            p.bp_systolic.is_some(),
            p.cholesterol.is_some(),
            p.bmi.is_some(),
            p.smoking.is_some(),
            p.alcohol_level.is_some(),
            p.exercise_freq.is_some(),
            p.sleep_hours.is_some(),
            p.stress_score.is_some(),
        ];
        let missing: Vec<&str> = INPUT_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| *name)
            .collect();

        match (
            p.age,
            p.sex,
            p.bp_systolic,
            p.cholesterol,
            p.bmi,
            p.smoking,
            p.alcohol_level,
            p.exercise_freq,
            p.sleep_hours,
            p.stress_score,
        ) {
            (
                Some(age),
                Some(sex),
                Some(bp_systolic),
                Some(cholesterol),
                Some(bmi),
                Some(smoking),
                Some(alcohol_level),
                Some(exercise_freq),
                Some(sleep_hours),
                Some(stress_score),
            ) => Ok(Self {
                age,
                sex,
                bp_systolic,
                cholesterol,
                bmi,
                smoking,
                alcohol_level,
                exercise_freq,
                sleep_hours,
                stress_score,
            }),
            _ => Err(TwinError::InvalidInput(format!(
                "missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}

impl InputRecord {
    /// Parse an input record from a JSON document.
    ///
    /// All absent fields are reported together in a single error.
    ///
    /// # Errors
    /// Returns `TwinError::InvalidInput` on malformed JSON, wrong field types
    /// or missing fields.
    pub fn from_json_str(s: &str) -> Result<Self, TwinError> {
        let partial: PartialInputRecord =
            serde_json::from_str(s).map_err(|e| TwinError::InvalidInput(e.to_string()))?;
        partial.try_into()
    }

    /// Parse an input record from an already-decoded JSON value.
    ///
    /// # Errors
    /// Same as [`InputRecord::from_json_str`].
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, TwinError> {
        let partial: PartialInputRecord =
            serde_json::from_value(value).map_err(|e| TwinError::InvalidInput(e.to_string()))?;
        partial.try_into()
    }

    /// Map the record into the classifier feature schema.
    ///
    /// Pure rename; no range checks.
    #[must_use]
    pub fn features(&self) -> FeatureVector {
        FeatureVector {
            age: f64::from(self.age),
            sex: f64::from(self.sex),
            trestbps: self.bp_systolic,
            chol: self.cholesterol,
        }
    }

    /// Reject numeric fields that are NaN or infinite.
    ///
    /// # Errors
    /// Returns `TwinError::InvalidInput` naming the first offending field.
    pub fn ensure_finite(&self) -> Result<(), TwinError> {
        let floats = [
            ("bp_systolic", self.bp_systolic),
            ("cholesterol", self.cholesterol),
            ("bmi", self.bmi),
            ("sleep_hours", self.sleep_hours),
        ];
        match floats.iter().find(|(_, v)| !v.is_finite()) {
            Some((name, v)) => Err(TwinError::InvalidInput(format!(
                "{name} must be a finite number, got {v}"
            ))),
            None => Ok(()),
        }
    }

    /// Validate that all fields are within the accepted boundary ranges.
    ///
    /// # Errors
    /// Returns validation errors as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(18..=120).contains(&self.age) {
            errors.push(format!("Age {} out of range [18, 120]", self.age));
        }
        if self.sex > 1 {
            errors.push(format!("Sex {} must be 0 or 1", self.sex));
        }
        if !(70.0..=250.0).contains(&self.bp_systolic) {
            errors.push(format!(
                "Systolic BP {} out of range [70, 250]",
                self.bp_systolic
            ));
        }
        if !(100.0..=500.0).contains(&self.cholesterol) {
            errors.push(format!(
                "Cholesterol {} out of range [100, 500]",
                self.cholesterol
            ));
        }
        if !(15.0..=50.0).contains(&self.bmi) {
            errors.push(format!("BMI {} out of range [15, 50]", self.bmi));
        }
        if self.smoking > 1 {
            errors.push(format!("Smoking {} must be 0 or 1", self.smoking));
        }
        if self.alcohol_level > 3 {
            errors.push(format!(
                "Alcohol level {} out of range [0, 3]",
                self.alcohol_level
            ));
        }
        if self.exercise_freq > 7 {
            errors.push(format!(
                "Exercise frequency {} out of range [0, 7]",
                self.exercise_freq
            ));
        }
        if !(3.0..=12.0).contains(&self.sleep_hours) {
            errors.push(format!(
                "Sleep hours {} out of range [3, 12]",
                self.sleep_hours
            ));
        }
        if !(1..=10).contains(&self.stress_score) {
            errors.push(format!(
                "Stress score {} out of range [1, 10]",
                self.stress_score
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy_worker() -> InputRecord {
        InputRecord {
            age: 30,
            sex: 1,
            bp_systolic: 120.0,
            cholesterol: 180.0,
            bmi: 23.5,
            smoking: 0,
            alcohol_level: 1,
            exercise_freq: 4,
            sleep_hours: 7.5,
            stress_score: 4,
        }
    }

    #[test]
    fn test_feature_mapping() {
        let features = healthy_worker().features();
        assert_eq!(features.to_array(), [30.0, 1.0, 120.0, 180.0]);
        assert!((features.trestbps - 120.0).abs() < f64::EPSILON);
        assert!((features.chol - 180.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_json_complete() {
        let json = r#"{
            "age": 30, "sex": 1, "bp_systolic": 120, "cholesterol": 180,
            "bmi": 23.5, "smoking": 0, "alcohol_level": 1, "exercise_freq": 4,
            "sleep_hours": 7.5, "stress_score": 4
        }"#;
        let record = InputRecord::from_json_str(json).expect("Should parse");
        assert_eq!(record, healthy_worker());
    }

    #[test]
    fn test_from_json_reports_all_missing_fields() {
        let json = r#"{"age": 30, "sex": 1, "bp_systolic": 120, "cholesterol": 180,
            "smoking": 0, "alcohol_level": 1, "exercise_freq": 4, "sleep_hours": 7.5}"#;
        let err = InputRecord::from_json_str(json).expect_err("must fail");
        assert_eq!(
            err,
            TwinError::InvalidInput("missing required fields: bmi, stress_score".into())
        );
    }

    #[test]
    fn test_from_json_rejects_wrong_types() {
        let value = serde_json::json!({ "age": "thirty" });
        let err = InputRecord::from_json_value(value).expect_err("must fail");
        assert!(matches!(err, TwinError::InvalidInput(_)));

        let err = InputRecord::from_json_str("[1, 2, 3]").expect_err("must fail");
        assert!(matches!(err, TwinError::InvalidInput(_)));
    }

    #[test]
    fn test_from_json_accepts_whole_number_floats() {
        let json = r#"{
            "age": 30.0, "sex": 1, "bp_systolic": 120, "cholesterol": 180,
            "bmi": 23.5, "smoking": 0.0, "alcohol_level": 1, "exercise_freq": 4.0,
            "sleep_hours": 7.5, "stress_score": 4
        }"#;
        let record = InputRecord::from_json_str(json).expect("Should parse");
        assert_eq!(record, healthy_worker());

        let fractional = json.replace("\"age\": 30.0", "\"age\": 30.5");
        let err = InputRecord::from_json_str(&fractional).expect_err("must fail");
        assert!(matches!(err, TwinError::InvalidInput(_)));

        let negative = json.replace("\"age\": 30.0", "\"age\": -1");
        assert!(InputRecord::from_json_str(&negative).is_err());
    }

    #[test]
    fn test_ensure_finite() {
        assert!(healthy_worker().ensure_finite().is_ok());

        let bad = InputRecord {
            bmi: f64::NAN,
            ..healthy_worker()
        };
        let err = bad.ensure_finite().expect_err("must fail");
        assert!(err.to_string().contains("bmi"));
    }

    #[test]
    fn test_validation() {
        assert!(healthy_worker().validate().is_ok());

        let invalid = InputRecord {
            age: 10,
            sex: 2,
            stress_score: 0,
            ..healthy_worker()
        };
        let errors = invalid.validate().expect_err("must fail");
        assert_eq!(errors.len(), 3);
    }
}
