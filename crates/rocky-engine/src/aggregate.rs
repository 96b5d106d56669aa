//! Finding aggregation: rule-table evaluation plus the fixed vital-sign,
//! allergy, and lifestyle checks.
//!
//! The fixed interaction checks and the table's interaction rows describe
//! the same drug pairs and both fire. Nothing is deduplicated: each match
//! contributes to the score.

use rocky_core::models::finding::{Contraindication, DosingConcern, Finding, Findings, Interaction};
use rocky_core::models::patient::PatientInput;
use rocky_core::models::severity::Severity;

use crate::classifier::{class_match, normalize};
use crate::rules::{DrugClassId, Rule, RuleMatch};

/// Intake reduced to the signals the checks read.
#[derive(Debug, Clone)]
pub struct PatientProfile {
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
    pub conditions: Vec<String>,
    pub age: i32,
    pub bmi: f64,
    pub bp_systolic: f64,
    pub bp_diastolic: f64,
    pub smoking: String,
    pub alcohol: String,
    pub exercise: String,
}

impl PatientProfile {
    pub fn from_input(input: &PatientInput) -> Self {
        Self {
            medications: normalize(&input.medications),
            allergies: normalize(&input.allergies),
            conditions: input.condition_labels(),
            age: input.age,
            bmi: input.effective_bmi(),
            bp_systolic: input.bp_systolic,
            bp_diastolic: input.bp_diastolic,
            smoking: input.smoking.trim().to_lowercase(),
            alcohol: input.alcohol.trim().to_lowercase(),
            exercise: input.exercise.trim().to_lowercase(),
        }
    }

    /// True when a medication token belongs to `class`.
    pub fn takes(&self, class: DrugClassId) -> bool {
        class_match(&self.medications, class.class())
    }

    pub fn is_allergic_to(&self, class: DrugClassId) -> bool {
        class_match(&self.allergies, class.class())
    }

    pub fn has_condition(&self, label: &str) -> bool {
        self.conditions.iter().any(|c| c == label)
    }

    pub fn is_elderly(&self) -> bool {
        self.age >= 65
    }

    pub fn is_pregnant(&self) -> bool {
        self.has_condition(PREGNANT)
    }

    pub fn has_renal_impairment(&self) -> bool {
        self.has_condition(KIDNEY_DISEASE)
    }

    pub fn has_hepatic_impairment(&self) -> bool {
        self.has_condition(LIVER_DISEASE)
    }

    pub fn has_heart_disease(&self) -> bool {
        self.has_condition(HEART_DISEASE)
    }

    pub fn has_hypertension(&self) -> bool {
        self.has_condition(HYPERTENSION)
    }

    fn is_sedentary(&self) -> bool {
        matches!(self.exercise.as_str(), "none" | "sedentary")
    }

    fn matches(&self, rule: &Rule) -> bool {
        match &rule.matcher {
            RuleMatch::Interaction { class_a, class_b } => {
                self.takes(*class_a) && self.takes(*class_b)
            }
            RuleMatch::Contraindication {
                condition,
                requires,
            } => self.has_condition(condition) && requires.is_none_or(|class| self.takes(class)),
            RuleMatch::Dosing { condition } => self.has_condition(condition),
        }
    }
}

pub const PREGNANT: &str = "pregnant";
pub const KIDNEY_DISEASE: &str = "kidney disease";
pub const LIVER_DISEASE: &str = "liver disease";
pub const HEART_DISEASE: &str = "heart disease";
pub const HYPERTENSION: &str = "hypertension";

fn interaction(pair: &str, severity: Severity, note: &str) -> Finding {
    Finding::Interaction(Interaction {
        pair: pair.to_string(),
        severity,
        note: note.to_string(),
    })
}

fn contraindication(subject: &str, severity: Severity, note: &str) -> Finding {
    Finding::Contraindication(Contraindication {
        condition_or_allergy: subject.to_string(),
        severity,
        note: note.to_string(),
    })
}

fn dosing(factor: &str, severity: Severity, recommendation: &str) -> Finding {
    Finding::DosingConcern(DosingConcern {
        factor: factor.to_string(),
        severity,
        recommendation: recommendation.to_string(),
    })
}

fn from_rule(rule: &Rule) -> Finding {
    match &rule.matcher {
        RuleMatch::Interaction { class_a, class_b } => {
            interaction(&format!("{class_a}+{class_b}"), rule.severity, &rule.note)
        }
        RuleMatch::Contraindication { condition, .. } => {
            contraindication(condition, rule.severity, &rule.note)
        }
        RuleMatch::Dosing { condition } => dosing(condition, rule.severity, &rule.note),
    }
}

/// Evaluate every check against one patient. Pure and deterministic for a
/// given rule table.
pub fn aggregate(profile: &PatientProfile, rules: &[Rule]) -> Findings {
    let mut findings = Findings::default();
    let pde5i = profile.takes(DrugClassId::Pde5i);

    if pde5i && profile.takes(DrugClassId::Nitrates) {
        findings.push(interaction(
            "Nitrates + PDE5i",
            Severity::High,
            "Risk of profound hypotension; avoid co-administration.",
        ));
    }
    if pde5i && profile.takes(DrugClassId::AlphaBlockers) {
        findings.push(interaction(
            "Alpha-blocker + PDE5i",
            Severity::Medium,
            "Additive hypotension; separate dosing and start low.",
        ));
    }
    if pde5i && profile.takes(DrugClassId::Cyp3a4Inhibitors) {
        findings.push(interaction(
            "Strong CYP3A4 inhibitor + PDE5i",
            Severity::Medium,
            "Higher PDE5i levels; use lowest dose and monitor.",
        ));
    }

    for rule in rules.iter().filter(|r| profile.matches(r)) {
        findings.push(from_rule(rule));
    }

    push_contraindications(profile, &mut findings);
    push_dosing_concerns(profile, &mut findings);
    findings
}

fn push_contraindications(profile: &PatientProfile, findings: &mut Findings) {
    if profile.takes(DrugClassId::Nitrates) {
        findings.push(contraindication(
            "Nitrate therapy",
            Severity::High,
            "Concurrent nitrate use contraindicates PDE5 inhibitors due to hypotension risk.",
        ));
    }

    let (sys, dia) = (profile.bp_systolic, profile.bp_diastolic);
    if sys >= 170.0 || dia >= 110.0 {
        findings.push(contraindication(
            "Severely elevated BP",
            Severity::High,
            "Uncontrolled hypertension; PDE5 inhibitors contraindicated.",
        ));
    } else if sys >= 150.0 || dia >= 95.0 {
        findings.push(contraindication(
            "Elevated BP",
            Severity::Medium,
            "Elevated blood pressure; use lowest dose and monitor.",
        ));
    }

    if profile.is_allergic_to(DrugClassId::Pde5i) {
        findings.push(contraindication(
            "PDE5 inhibitor allergy",
            Severity::High,
            "Do not prescribe PDE5 inhibitors.",
        ));
    }
    if profile.is_allergic_to(DrugClassId::Nitrates) {
        findings.push(contraindication(
            "Nitrate allergy",
            Severity::High,
            "Avoid nitrates and PDE5 co-prescribing.",
        ));
    }
    if profile.is_pregnant() {
        findings.push(contraindication(
            "Pregnancy",
            Severity::Medium,
            "Safety not established; avoid PDE5 inhibitors.",
        ));
    }
    if profile.has_heart_disease() {
        findings.push(contraindication(
            "Heart Disease",
            Severity::Medium,
            "Assess hemodynamic reserve; prefer low dose or alternative.",
        ));
    }
    if profile.has_hypertension() {
        findings.push(contraindication(
            "Hypertension",
            Severity::Medium,
            "Monitor BP; start low to avoid hypotension.",
        ));
    }
}

fn push_dosing_concerns(profile: &PatientProfile, findings: &mut Findings) {
    if profile.is_elderly() {
        findings.push(dosing(
            "Age >65",
            Severity::Medium,
            "Initiate at lowest dose; titrate cautiously.",
        ));
    }
    if profile.has_renal_impairment() {
        findings.push(dosing(
            "Renal impairment",
            Severity::Medium,
            "Max 2.5mg-5mg daily; monitor for hypotension.",
        ));
    }
    if profile.has_hepatic_impairment() {
        findings.push(dosing(
            "Hepatic impairment",
            Severity::Medium,
            "Use lowest dose; consider avoiding if severe.",
        ));
    }

    if profile.bmi >= 35.0 {
        findings.push(dosing(
            "Obesity (BMI ≥35)",
            Severity::Medium,
            "Start lowest dose; monitor cardiovascular tolerance.",
        ));
    } else if profile.bmi >= 30.0 {
        findings.push(dosing(
            "Overweight (BMI ≥30)",
            Severity::Low,
            "Start low; encourage weight management and monitoring.",
        ));
    }

    if profile.smoking == "current" {
        findings.push(dosing(
            "Smoking",
            Severity::Low,
            "Counsel cessation; monitor CV risk with therapy.",
        ));
    }
    if profile.alcohol == "heavy" {
        findings.push(dosing(
            "Heavy alcohol use",
            Severity::Medium,
            "Avoid concurrent dosing; monitor BP and sedation risk.",
        ));
    }
    if profile.is_sedentary() {
        findings.push(dosing(
            "Sedentary",
            Severity::Low,
            "Encourage activity; monitor cardiometabolic risk.",
        ));
    }
}
