use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::severity::Severity;

/// A drug-drug interaction detected among the patient's medications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Interaction {
    pub pair: String,
    pub severity: Severity,
    pub note: String,
}

/// A condition, vital sign, or allergy that argues against treatment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Contraindication {
    pub condition_or_allergy: String,
    pub severity: Severity,
    pub note: String,
}

/// A patient factor that calls for a dose adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DosingConcern {
    pub factor: String,
    pub severity: Severity,
    pub recommendation: String,
}

/// One detected safety finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Interaction(Interaction),
    Contraindication(Contraindication),
    DosingConcern(DosingConcern),
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Finding::Interaction(i) => i.severity,
            Finding::Contraindication(c) => c.severity,
            Finding::DosingConcern(d) => d.severity,
        }
    }

    /// Human-readable one-line form, e.g.
    /// `[HIGH] Interaction: Nitrates + PDE5i - Risk of profound hypotension`.
    pub fn issue(&self) -> String {
        match self {
            Finding::Interaction(i) => {
                format!("[{}] Interaction: {} - {}", i.severity, i.pair, i.note)
            }
            Finding::Contraindication(c) => format!(
                "[{}] Contraindication: {} - {}",
                c.severity, c.condition_or_allergy, c.note
            ),
            Finding::DosingConcern(d) => {
                format!("[{}] Dosing: {} - {}", d.severity, d.factor, d.recommendation)
            }
        }
    }
}

/// The three ordered finding lists produced by one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    pub interactions: Vec<Interaction>,
    pub contraindications: Vec<Contraindication>,
    pub dosing_concerns: Vec<DosingConcern>,
}

impl Findings {
    pub fn push(&mut self, finding: Finding) {
        match finding {
            Finding::Interaction(i) => self.interactions.push(i),
            Finding::Contraindication(c) => self.contraindications.push(c),
            Finding::DosingConcern(d) => self.dosing_concerns.push(d),
        }
    }

    pub fn len(&self) -> usize {
        self.interactions.len() + self.contraindications.len() + self.dosing_concerns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Severities of every finding, interactions first.
    pub fn severities(&self) -> impl Iterator<Item = Severity> + '_ {
        self.interactions
            .iter()
            .map(|i| i.severity)
            .chain(self.contraindications.iter().map(|c| c.severity))
            .chain(self.dosing_concerns.iter().map(|d| d.severity))
    }

    /// Highest severity present; `Low` when there are no findings.
    pub fn max_severity(&self) -> Severity {
        self.severities().max().unwrap_or(Severity::Low)
    }

    /// True when a HIGH interaction or contraindication forbids prescribing.
    pub fn has_blocker(&self) -> bool {
        self.interactions.iter().any(|i| i.severity == Severity::High)
            || self
                .contraindications
                .iter()
                .any(|c| c.severity == Severity::High)
    }

    /// Flattened issue strings in list order, or the `"None"` sentinel.
    pub fn issues(&self) -> Vec<String> {
        let mut issues: Vec<String> = self
            .interactions
            .iter()
            .cloned()
            .map(Finding::Interaction)
            .chain(
                self.contraindications
                    .iter()
                    .cloned()
                    .map(Finding::Contraindication),
            )
            .chain(self.dosing_concerns.iter().cloned().map(Finding::DosingConcern))
            .map(|f| f.issue())
            .collect();
        if issues.is_empty() {
            issues.push(NO_ISSUES.to_string());
        }
        issues
    }
}

/// Issue list sentinel used when nothing was found.
pub const NO_ISSUES: &str = "None";
