//! Drug classes and the ordered rule table.
//!
//! Both are read-only after load. The built-in table is compiled in; a
//! deployment may replace it with a JSON file of the same shape.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use rocky_core::models::severity::Severity;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Identifier of a drug class, as written in rule tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DrugClassId {
    Pde5i = 0,
    Nitrates = 1,
    AlphaBlockers = 2,
    Cyp3a4Inhibitors = 3,
}

impl DrugClassId {
    pub fn as_str(self) -> &'static str {
        match self {
            DrugClassId::Pde5i => "pde5i",
            DrugClassId::Nitrates => "nitrates",
            DrugClassId::AlphaBlockers => "alphaBlockers",
            DrugClassId::Cyp3a4Inhibitors => "cyp3a4Inhibitors",
        }
    }

    pub fn class(self) -> &'static DrugClass {
        &DRUG_CLASSES[self as usize]
    }
}

impl fmt::Display for DrugClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named set of lowercase substrings identifying class membership.
#[derive(Debug, Serialize)]
pub struct DrugClass {
    pub id: DrugClassId,
    pub name: &'static str,
    pub members: &'static [&'static str],
}

/// Indexed by [`DrugClassId`] discriminant.
pub static DRUG_CLASSES: [DrugClass; 4] = [
    DrugClass {
        id: DrugClassId::Pde5i,
        name: "PDE5 inhibitors",
        members: &["sildenafil", "tadalafil", "vardenafil", "avanafil"],
    },
    DrugClass {
        id: DrugClassId::Nitrates,
        name: "Nitrates",
        members: &[
            "nitroglycerin",
            "isosorbide",
            "isosorbide dinitrate",
            "isosorbide mononitrate",
        ],
    },
    DrugClass {
        id: DrugClassId::AlphaBlockers,
        name: "Alpha-blockers",
        members: &["tamsulosin", "doxazosin", "terazosin", "alfuzosin"],
    },
    DrugClass {
        id: DrugClassId::Cyp3a4Inhibitors,
        name: "Strong CYP3A4 inhibitors",
        members: &[
            "ketoconazole",
            "itraconazole",
            "ritonavir",
            "cobicistat",
            "clarithromycin",
        ],
    },
];

/// What a rule needs to see in the patient's intake to fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleMatch {
    /// Both classes present among medications.
    Interaction {
        class_a: DrugClassId,
        class_b: DrugClassId,
    },
    /// Condition present, and the required class too when one is named.
    Contraindication {
        condition: String,
        requires: Option<DrugClassId>,
    },
    /// Condition present.
    Dosing { condition: String },
}

/// One row of the rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleRecord", into = "RuleRecord")]
pub struct Rule {
    pub id: String,
    pub severity: Severity,
    pub matcher: RuleMatch,
    pub note: String,
}

impl Rule {
    fn interaction(
        id: &str,
        severity: Severity,
        class_a: DrugClassId,
        class_b: DrugClassId,
        note: &str,
    ) -> Self {
        Rule {
            id: id.to_string(),
            severity,
            matcher: RuleMatch::Interaction { class_a, class_b },
            note: note.to_string(),
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self.matcher {
            RuleMatch::Interaction { .. } => RuleKind::Interaction,
            RuleMatch::Contraindication { .. } => RuleKind::Contraindication,
            RuleMatch::Dosing { .. } => RuleKind::Dosing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Interaction,
    #[serde(alias = "contra")]
    Contraindication,
    Dosing,
}

/// Wire form of a rule: `{id, type, severity, match, note}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RuleKind,
    pub severity: Severity,
    #[serde(rename = "match", default)]
    pub matcher: MatchRecord,
    pub note: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drug_class_a: Option<DrugClassId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drug_class_b: Option<DrugClassId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_drug_class: Option<DrugClassId>,
}

impl TryFrom<RuleRecord> for Rule {
    type Error = EngineError;

    fn try_from(record: RuleRecord) -> Result<Self, Self::Error> {
        let invalid = |reason: &str| EngineError::InvalidRule {
            id: record.id.clone(),
            reason: reason.to_string(),
        };
        let condition = || {
            record
                .matcher
                .condition
                .as_deref()
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty())
                .ok_or_else(|| invalid("missing match.condition"))
        };

        let matcher = match record.kind {
            RuleKind::Interaction => match (record.matcher.drug_class_a, record.matcher.drug_class_b)
            {
                (Some(class_a), Some(class_b)) => RuleMatch::Interaction { class_a, class_b },
                _ => return Err(invalid("interaction needs drugClassA and drugClassB")),
            },
            RuleKind::Contraindication => RuleMatch::Contraindication {
                condition: condition()?,
                requires: record.matcher.requires_drug_class,
            },
            RuleKind::Dosing => RuleMatch::Dosing {
                condition: condition()?,
            },
        };

        Ok(Rule {
            id: record.id,
            severity: record.severity,
            matcher,
            note: record.note,
        })
    }
}

impl From<Rule> for RuleRecord {
    fn from(rule: Rule) -> Self {
        let kind = rule.kind();
        let matcher = match rule.matcher {
            RuleMatch::Interaction { class_a, class_b } => MatchRecord {
                drug_class_a: Some(class_a),
                drug_class_b: Some(class_b),
                ..Default::default()
            },
            RuleMatch::Contraindication {
                condition,
                requires,
            } => MatchRecord {
                condition: Some(condition),
                requires_drug_class: requires,
                ..Default::default()
            },
            RuleMatch::Dosing { condition } => MatchRecord {
                condition: Some(condition),
                ..Default::default()
            },
        };
        RuleRecord {
            id: rule.id,
            kind,
            severity: rule.severity,
            matcher,
            note: rule.note,
        }
    }
}

static BUILTIN_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::interaction(
            "nitrates+pde5i",
            Severity::High,
            DrugClassId::Nitrates,
            DrugClassId::Pde5i,
            "Risk of profound hypotension; avoid co-administration.",
        ),
        Rule::interaction(
            "alpha+pde5i",
            Severity::Medium,
            DrugClassId::AlphaBlockers,
            DrugClassId::Pde5i,
            "Additive hypotension; separate dosing and start low.",
        ),
        Rule::interaction(
            "cyp3a4+pde5i",
            Severity::Medium,
            DrugClassId::Cyp3a4Inhibitors,
            DrugClassId::Pde5i,
            "Higher PDE5i levels; use lowest dose and monitor.",
        ),
        Rule {
            id: "pregnancy+pde5i".to_string(),
            severity: Severity::Medium,
            matcher: RuleMatch::Contraindication {
                condition: "pregnant".to_string(),
                requires: Some(DrugClassId::Pde5i),
            },
            note: "Safety in pregnancy not established; avoid PDE5 inhibitors.".to_string(),
        },
        Rule {
            id: "renal+pde5i".to_string(),
            severity: Severity::Medium,
            matcher: RuleMatch::Dosing {
                condition: "kidney disease".to_string(),
            },
            note: "Max 2.5-5mg daily; monitor closely.".to_string(),
        },
    ]
});

/// The compiled-in rule table, in evaluation order.
pub fn builtin_rules() -> &'static [Rule] {
    &BUILTIN_RULES
}

/// Parse a rule table from JSON text (an array of rule records).
pub fn parse_rules(json: &str) -> Result<Vec<Rule>, EngineError> {
    Ok(serde_json::from_str(json)?)
}

/// Load a rule table from a JSON file.
pub fn load_rules(path: &Path) -> Result<Vec<Rule>, EngineError> {
    let text = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rules(&text)
}
