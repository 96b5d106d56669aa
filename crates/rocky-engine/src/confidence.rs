use rocky_core::models::finding::Contraindication;
use rocky_core::models::result::Plan;
use rocky_core::models::severity::Severity;

use crate::classifier::{class_match, normalize};
use crate::rules::DrugClassId;

pub const CONFIDENCE_FLOOR: f64 = 0.6;
/// Plan confidence when pharmacotherapy is deferred.
pub const DEFERRED_PLAN_CONFIDENCE: f64 = 0.4;
/// Minimum reviewed confidence for a non-PDE5 choice with no HIGH
/// contraindication.
pub const SAFE_ALTERNATIVE_FLOOR: f64 = 0.7;

/// `max(0.6, 1 − score/120)`, on the formula score.
pub fn confidence_score(formula_score: u8) -> f64 {
    (1.0 - f64::from(formula_score) / 120.0).max(CONFIDENCE_FLOOR)
}

pub fn plan_confidence(confidence: f64, plan: &Plan) -> f64 {
    if plan.is_deferred() {
        DEFERRED_PLAN_CONFIDENCE
    } else {
        confidence
    }
}

/// Apply a reviewer's plan confidence.
///
/// When the reviewed medication is not a PDE5 inhibitor and nothing HIGH
/// contraindicates treatment, the confidence is held at or above
/// [`SAFE_ALTERNATIVE_FLOOR`].
pub fn reviewed_plan_confidence(
    proposed: f64,
    reviewed_medication: &str,
    contraindications: &[Contraindication],
) -> f64 {
    let is_pde5i = class_match(&normalize(reviewed_medication), DrugClassId::Pde5i.class());
    let high_contraindication = contraindications
        .iter()
        .any(|c| c.severity == Severity::High);

    if !is_pde5i && !high_contraindication {
        proposed.max(SAFE_ALTERNATIVE_FLOOR)
    } else {
        proposed
    }
}
