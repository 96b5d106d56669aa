use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::lenient;

/// Structured patient intake, as submitted by the intake wizard.
///
/// Every field is optional on the wire. Numeric fields of the wrong type
/// read as zero, which the engine treats as "not provided".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct PatientInput {
    #[serde(deserialize_with = "lenient::deserialize_string")]
    pub name: String,
    /// Years.
    #[serde(deserialize_with = "lenient::deserialize_i32")]
    pub age: i32,
    /// Kilograms.
    #[serde(deserialize_with = "lenient::deserialize_f64")]
    pub weight: f64,
    /// Centimetres.
    #[serde(deserialize_with = "lenient::deserialize_f64")]
    pub height: f64,
    #[serde(deserialize_with = "lenient::deserialize_f64")]
    pub bmi: f64,
    #[serde(deserialize_with = "lenient::deserialize_f64")]
    pub bp_systolic: f64,
    #[serde(deserialize_with = "lenient::deserialize_f64")]
    pub bp_diastolic: f64,
    #[serde(deserialize_with = "lenient::deserialize_string")]
    pub smoking: String,
    #[serde(deserialize_with = "lenient::deserialize_string")]
    pub alcohol: String,
    #[serde(deserialize_with = "lenient::deserialize_string")]
    pub exercise: String,
    #[serde(deserialize_with = "lenient::deserialize_string_list")]
    pub conditions: Vec<String>,
    /// Comma- or semicolon-separated free text.
    #[serde(deserialize_with = "lenient::deserialize_string")]
    pub medications: String,
    #[serde(deserialize_with = "lenient::deserialize_string")]
    pub medication_details: String,
    #[serde(deserialize_with = "lenient::deserialize_string")]
    pub allergies: String,
    #[serde(deserialize_with = "lenient::deserialize_string")]
    pub complaint: String,
}

impl PatientInput {
    /// The submitted BMI, or one derived from weight and height when the
    /// form left it blank. Zero when neither is available.
    pub fn effective_bmi(&self) -> f64 {
        if self.bmi > 0.0 {
            return self.bmi;
        }
        if self.weight > 0.0 && self.height > 0.0 {
            let metres = self.height / 100.0;
            return self.weight / (metres * metres);
        }
        0.0
    }

    /// Condition labels, trimmed and lowercased.
    pub fn condition_labels(&self) -> Vec<String> {
        self.conditions
            .iter()
            .map(|c| c.trim().to_lowercase())
            .collect()
    }

    pub fn has_condition(&self, label: &str) -> bool {
        self.conditions
            .iter()
            .any(|c| c.trim().eq_ignore_ascii_case(label))
    }
}
