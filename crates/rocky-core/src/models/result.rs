use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::finding::{Contraindication, DosingConcern, Interaction};
use super::severity::RiskLevel;

/// Medication sentinel for a deferred plan.
pub const NO_MEDICATION: &str = "None";
/// Dosage and duration sentinel for a deferred plan.
pub const NOT_APPLICABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Plan {
    pub medication: String,
    pub dosage: String,
    pub duration: String,
    /// `"; "`-joined clauses.
    pub rationale: String,
}

impl Plan {
    /// True when no medication is issued.
    pub fn is_deferred(&self) -> bool {
        self.medication.trim().eq_ignore_ascii_case(NO_MEDICATION)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Alternative {
    pub option: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecommendationConfidence {
    pub plan: f64,
}

/// Where a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Source {
    #[serde(rename = "rules")]
    Rules,
    #[serde(rename = "model")]
    Model,
    #[serde(rename = "rules+model")]
    RulesAndModel,
}

/// The terminal artifact of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DiagnosticResult {
    /// 0–100 inclusive.
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub issues: Vec<String>,
    pub interactions: Vec<Interaction>,
    pub contraindications: Vec<Contraindication>,
    pub dosing_concerns: Vec<DosingConcern>,
    pub plan: Plan,
    pub alternatives: Vec<Alternative>,
    pub confidence_score: f64,
    pub recommendation_confidence: RecommendationConfidence,
    pub source: Source,
}
