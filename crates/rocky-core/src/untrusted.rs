//! Result-shaped data from sources the engine does not control.
//!
//! A language model's candidate result, or an external interaction
//! service's response, may be partial, mistyped, or carry extra keys. It is
//! read into explicit optional fields here, with one coercion rule per
//! field, and never rejected as a whole.

use serde_json::Value;

use crate::error::CoreError;
use crate::lenient;
use crate::models::finding::Interaction;
use crate::models::result::{Alternative, NO_MEDICATION, NOT_APPLICABLE, Plan};
use crate::models::severity::{RiskLevel, Severity};

/// Confidence given to an alternative supplied as a bare label.
pub const UNRATED_ALTERNATIVE_CONFIDENCE: f64 = 0.5;

/// What an untrusted source said about the overall risk level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LevelClaim {
    /// The field was absent or not a string.
    #[default]
    Missing,
    Known(RiskLevel),
    /// A string that is not one of the three levels.
    Unrecognized(String),
}

impl LevelClaim {
    /// The level this claim reads as on its own: an absent level is
    /// `Medium`, a string the engine does not understand is `Low`.
    pub fn effective(&self) -> RiskLevel {
        match self {
            LevelClaim::Missing => RiskLevel::Medium,
            LevelClaim::Known(level) => *level,
            LevelClaim::Unrecognized(_) => RiskLevel::Low,
        }
    }

    /// The level used when merging with the engine's own level. Anything
    /// other than a recognized level ranks lowest, so it can only ever
    /// leave the engine's level in place.
    pub fn rank(&self) -> RiskLevel {
        match self {
            LevelClaim::Known(level) => *level,
            LevelClaim::Missing | LevelClaim::Unrecognized(_) => RiskLevel::Low,
        }
    }

    fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) => match RiskLevel::parse(s) {
                Some(level) => LevelClaim::Known(level),
                None => LevelClaim::Unrecognized(s.clone()),
            },
            _ => LevelClaim::Missing,
        }
    }
}

/// A candidate diagnostic result of unknown provenance.
///
/// Structured findings are deliberately not read: the deterministic engine
/// stays authoritative for interactions, contraindications, and dosing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UntrustedResult {
    /// Rounded and clamped to 0–100.
    pub risk_score: Option<u8>,
    pub risk_level: LevelClaim,
    pub issues: Vec<String>,
    /// Present only when `medication` is a non-empty string.
    pub plan: Option<Plan>,
    /// Present only when at least one usable entry survived coercion.
    pub alternatives: Option<Vec<Alternative>>,
    /// Clamped to `[0, 1]`.
    pub confidence_score: Option<f64>,
    /// `recommendationConfidence.plan`, clamped to `[0, 1]`.
    pub plan_confidence: Option<f64>,
    pub source: Option<String>,
}

impl UntrustedResult {
    /// Parse JSON text. Fails only when the text is not JSON at all;
    /// non-object JSON yields an empty result.
    pub fn from_json_str(text: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        Self {
            risk_score: obj.get("riskScore").and_then(lenient::number).map(|score| {
                score.round().clamp(0.0, 100.0) as u8
            }),
            risk_level: LevelClaim::from_value(obj.get("riskLevel")),
            issues: obj
                .get("issues")
                .map(lenient::string_list)
                .unwrap_or_default(),
            plan: obj.get("plan").and_then(coerce_plan),
            alternatives: obj.get("alternatives").and_then(coerce_alternatives),
            confidence_score: obj.get("confidenceScore").and_then(lenient::unit_interval),
            plan_confidence: obj
                .get("recommendationConfidence")
                .and_then(|rc| rc.get("plan"))
                .and_then(lenient::unit_interval),
            source: obj.get("source").and_then(lenient::text),
        }
    }
}

fn coerce_plan(value: &Value) -> Option<Plan> {
    let obj = value.as_object()?;
    let medication = obj
        .get("medication")
        .and_then(lenient::text)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .map(|m| {
            if m.eq_ignore_ascii_case(NO_MEDICATION) {
                NO_MEDICATION.to_string()
            } else {
                m
            }
        })?;
    let field = |key: &str, fallback: &str| {
        obj.get(key)
            .and_then(lenient::text)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    };

    Some(Plan {
        medication,
        dosage: field("dosage", NOT_APPLICABLE),
        duration: field("duration", NOT_APPLICABLE),
        rationale: field("rationale", ""),
    })
}

fn coerce_alternatives(value: &Value) -> Option<Vec<Alternative>> {
    let items = value.as_array()?;
    let alternatives: Vec<Alternative> = items
        .iter()
        .filter_map(|item| match item {
            Value::String(label) if !label.trim().is_empty() => Some(Alternative {
                option: label.trim().to_string(),
                confidence: UNRATED_ALTERNATIVE_CONFIDENCE,
            }),
            Value::Object(obj) => {
                let option = obj
                    .get("option")
                    .and_then(lenient::text)
                    .filter(|o| !o.trim().is_empty())?;
                let confidence = obj
                    .get("confidence")
                    .and_then(lenient::unit_interval)
                    .unwrap_or(UNRATED_ALTERNATIVE_CONFIDENCE);
                Some(Alternative { option, confidence })
            }
            _ => None,
        })
        .collect();

    (!alternatives.is_empty()).then_some(alternatives)
}

/// Read an interaction list from an external lookup response.
///
/// Accepts a bare array or an object with an `interactions` array. Entries
/// without a pair are dropped; an unknown severity reads as `Low`.
pub fn coerce_interactions(value: &Value) -> Vec<Interaction> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(obj) => match obj.get("interactions") {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let pair = obj
                .get("pair")
                .and_then(lenient::text)
                .filter(|p| !p.trim().is_empty())?;
            let severity = obj
                .get("severity")
                .and_then(Value::as_str)
                .and_then(Severity::parse)
                .unwrap_or(Severity::Low);
            let note = obj.get("note").and_then(lenient::text).unwrap_or_default();
            Some(Interaction {
                pair,
                severity,
                note,
            })
        })
        .collect()
}
