//! rocky-engine
//!
//! The deterministic safety rule engine. Pure data and pure functions: no
//! I/O beyond optionally reading a rule table at start-up. Classifies
//! medications, evaluates the rule table and fixed checks, scores the
//! findings, derives a plan, and reconciles against second sources.

pub mod aggregate;
pub mod alternatives;
pub mod classifier;
pub mod confidence;
pub mod error;
pub mod plan;
pub mod reconcile;
pub mod rules;
pub mod scoring;

use std::path::Path;

use rocky_core::models::finding::Findings;
use rocky_core::models::patient::PatientInput;
use rocky_core::models::result::{DiagnosticResult, RecommendationConfidence, Source};
use tracing::debug;

use aggregate::PatientProfile;
use error::EngineError;
use rules::Rule;

/// A rule engine bound to one rule table.
///
/// Evaluation borrows the engine immutably, so one instance can be shared
/// across concurrent requests.
#[derive(Debug, Clone)]
pub struct SafetyEngine {
    rules: Vec<Rule>,
}

impl Default for SafetyEngine {
    fn default() -> Self {
        Self::new(rules::builtin_rules().to_vec())
    }
}

impl SafetyEngine {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Build an engine from a JSON rule table on disk.
    pub fn from_path(path: &Path) -> Result<Self, EngineError> {
        Ok(Self::new(rules::load_rules(path)?))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The three finding lists for one patient.
    pub fn findings(&self, input: &PatientInput) -> Findings {
        aggregate::aggregate(&PatientProfile::from_input(input), &self.rules)
    }

    /// Run the full pipeline. Total over its input: every intake yields a
    /// result.
    pub fn evaluate(&self, input: &PatientInput) -> DiagnosticResult {
        let profile = PatientProfile::from_input(input);
        let findings = aggregate::aggregate(&profile, &self.rules);
        let risk = scoring::assess(&findings);
        let plan = plan::derive_plan(&profile, &findings);
        let confidence = confidence::confidence_score(risk.formula_score);
        let plan_confidence = confidence::plan_confidence(confidence, &plan);
        let alternatives = alternatives::alternatives(plan.is_deferred());

        debug!(
            findings = findings.len(),
            score = risk.score,
            level = %risk.level,
            medication = %plan.medication,
            "safety evaluation complete"
        );

        DiagnosticResult {
            risk_score: risk.score,
            risk_level: risk.level,
            issues: findings.issues(),
            interactions: findings.interactions,
            contraindications: findings.contraindications,
            dosing_concerns: findings.dosing_concerns,
            plan,
            alternatives,
            confidence_score: confidence,
            recommendation_confidence: RecommendationConfidence {
                plan: plan_confidence,
            },
            source: Source::Rules,
        }
    }
}

/// Evaluate against the built-in rule table.
pub fn evaluate(input: &PatientInput) -> DiagnosticResult {
    SafetyEngine::default().evaluate(input)
}
