//! Merging the engine's result with a second, less trusted source.
//!
//! The engine stays authoritative for findings. A second source can raise
//! the risk level or score, contribute issue text, and supply the plan,
//! alternatives, and confidence, but it can never lower a severity.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};

use rocky_core::models::finding::{Interaction, NO_ISSUES};
use rocky_core::models::result::{DiagnosticResult, RecommendationConfidence, Source};
use rocky_core::models::severity::Severity;
use rocky_core::untrusted::UntrustedResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::confidence::{plan_confidence, reviewed_plan_confidence};

/// Source label for interactions produced by this engine.
pub const ENGINE_SOURCE: &str = "engine";

/// Merge the engine's result with a candidate of unknown provenance.
///
/// A candidate plan is only taken when it agrees with the engine on
/// whether treatment is blocked, so a deferred plan always coincides with
/// a HIGH finding.
pub fn reconcile(rules: &DiagnosticResult, other: &UntrustedResult) -> DiagnosticResult {
    let issues = union_issues(&rules.issues, &other.issues);

    let risk_level = rules.risk_level.max(other.risk_level.rank());
    let risk_score = rules.risk_score.max(other.risk_score.unwrap_or(0));

    let candidate = match &other.plan {
        Some(plan) if plan.is_deferred() == rules.plan.is_deferred() => Some(plan),
        Some(plan) => {
            debug!(
                candidate = %plan.medication,
                engine = %rules.plan.medication,
                "candidate plan disagrees on blocking, keeping engine plan"
            );
            None
        }
        None => None,
    };
    // A reviewer's confidence belongs to the plan it reviewed. It is dropped
    // when that plan was rejected.
    let reviewed = other.plan.is_none() || candidate.is_some();
    let plan = candidate.cloned().unwrap_or_else(|| rules.plan.clone());

    let alternatives = other
        .alternatives
        .clone()
        .unwrap_or_else(|| rules.alternatives.clone());
    let confidence_score = other.confidence_score.unwrap_or(rules.confidence_score);

    let plan_conf = match other.plan_confidence {
        Some(proposed) if reviewed => {
            reviewed_plan_confidence(proposed, &plan.medication, &rules.contraindications)
        }
        _ => plan_confidence(confidence_score, &plan),
    };

    DiagnosticResult {
        risk_score,
        risk_level,
        issues,
        interactions: rules.interactions.clone(),
        contraindications: rules.contraindications.clone(),
        dosing_concerns: rules.dosing_concerns.clone(),
        plan,
        alternatives,
        confidence_score,
        recommendation_confidence: RecommendationConfidence { plan: plan_conf },
        source: Source::RulesAndModel,
    }
}

/// Exact-match union, engine issues first. The `"None"` sentinel only
/// survives when neither side reported anything.
fn union_issues(ours: &[String], theirs: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut merged: Vec<String> = ours
        .iter()
        .chain(theirs)
        .filter(|issue| issue.as_str() != NO_ISSUES)
        .filter(|issue| seen.insert(issue.as_str()))
        .cloned()
        .collect();
    if merged.is_empty() {
        merged.push(NO_ISSUES.to_string());
    }
    merged
}

/// An interaction tagged with the source it survived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcedInteraction {
    #[serde(flatten)]
    pub interaction: Interaction,
    pub source: String,
}

impl SourcedInteraction {
    /// Total order used to pick the survivor of a key collision: higher
    /// severity first, then the lexicographically smaller source label,
    /// then the smaller pair and note text.
    fn rank(&self) -> (Severity, Reverse<&str>, Reverse<&str>, Reverse<&str>) {
        (
            self.interaction.severity,
            Reverse(self.source.as_str()),
            Reverse(self.interaction.pair.as_str()),
            Reverse(self.interaction.note.as_str()),
        )
    }
}

fn merge_key(interaction: &Interaction) -> (String, String) {
    (
        interaction.pair.to_lowercase(),
        interaction.note.to_lowercase(),
    )
}

/// Merge interaction lists from labelled sources.
///
/// Entries collide when their lowercased pair and note match; the
/// higher-severity entry survives. The result is ordered by key, so it is
/// the same whatever order the sources or entries arrive in.
pub fn merge_interactions(sources: &[(&str, &[Interaction])]) -> Vec<SourcedInteraction> {
    let mut merged: BTreeMap<(String, String), SourcedInteraction> = BTreeMap::new();

    for (label, interactions) in sources {
        for interaction in interactions.iter() {
            let candidate = SourcedInteraction {
                interaction: interaction.clone(),
                source: label.to_string(),
            };
            let key = merge_key(interaction);
            let replace = merged
                .get(&key)
                .is_none_or(|current| candidate.rank() > current.rank());
            if replace {
                merged.insert(key, candidate);
            }
        }
    }

    merged.into_values().collect()
}
