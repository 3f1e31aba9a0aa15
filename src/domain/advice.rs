//! Rule-triggered lifestyle advice.

use serde::{Serialize, Serializer};

use super::InputRecord;

/// A single recommendation. Serialized as its message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Advice {
    Weight,
    Smoking,
    Exercise,
    Sleep,
    Relaxation,
}

impl Advice {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Weight => "Maintain a healthy weight to lower heart risk.",
            Self::Smoking => "Quit smoking to reduce cardio risk.",
            Self::Exercise => "Increase exercise frequency to improve health.",
            Self::Sleep => "Aim for 7–8 hours of sleep for recovery.",
            Self::Relaxation => "Try relaxation techniques to reduce stress.",
        }
    }
}

impl std::fmt::Display for Advice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Advice {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.message())
    }
}

/// Evaluate advice triggers in fixed order. Conditions are independent.
#[must_use]
pub fn generate_advice(input: &InputRecord) -> Vec<Advice> {
    let triggers = [
        (input.bmi >= 25.0, Advice::Weight),
        (input.smoking == 1, Advice::Smoking),
        (input.exercise_freq < 2, Advice::Exercise),
        (input.sleep_hours < 7.0, Advice::Sleep),
        (input.stress_score >= 7, Advice::Relaxation),
    ];

    triggers
        .into_iter()
        .filter_map(|(fired, advice)| fired.then_some(advice))
        .collect()
}
