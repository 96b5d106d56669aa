use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::models::patient::PatientInput;

/// One rejected intake field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Check intake for physiologically implausible values before it reaches
/// the engine. Zero means "not provided" for the optional measurements.
pub fn validate_intake(p: &PatientInput) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let mut add = |field: &str, message: &str| {
        errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    };

    if p.name.trim().is_empty() {
        add("name", "Name is required.");
    }

    if !(0..=120).contains(&p.age) {
        add("age", "Age must be between 0 and 120.");
    }

    if p.height < 0.0 || (p.height > 0.0 && !(90.0..=250.0).contains(&p.height)) {
        add("height", "Height must be between 90 and 250 cm when provided.");
    }

    if p.weight < 0.0 || (p.weight > 0.0 && !(25.0..=350.0).contains(&p.weight)) {
        add("weight", "Weight must be between 25 and 350 kg when provided.");
    }

    if (p.bp_systolic > 0.0 && p.bp_systolic < 50.0)
        || (p.bp_diastolic > 0.0 && p.bp_diastolic < 30.0)
    {
        add("bloodPressure", "Blood pressure values are implausible.");
    }

    if p.has_condition("hypertension") && (p.bp_systolic == 0.0 || p.bp_diastolic == 0.0) {
        add(
            "bloodPressure",
            "Blood pressure is required when hypertension is selected.",
        );
    }

    errors
}
