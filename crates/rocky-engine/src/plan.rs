use rocky_core::models::finding::Findings;
use rocky_core::models::result::{NO_MEDICATION, NOT_APPLICABLE, Plan};

use crate::aggregate::PatientProfile;
use crate::rules::DrugClassId;

pub const PREFERRED_MEDICATION: &str = "Tadalafil";
pub const STANDARD_DOSAGE: &str = "5mg Daily";
pub const STANDARD_DURATION: &str = "90 Days";
pub const CONSERVATIVE_DOSAGE: &str = "2.5mg Daily";
pub const CONSERVATIVE_DURATION: &str = "30 Days";

const DEFERRED_CLAUSE: &str = "Safety blockers present; pharmacotherapy deferred.";
const INDICATED_CLAUSE: &str =
    "PDE5 inhibitor indicated; starting conservatively due to risk factors.";

/// Rationale clauses in their fixed order. Pregnancy is named here but
/// does not change the dose; hypertension changes the dose but is not named.
fn risk_clauses(profile: &PatientProfile) -> Vec<(&'static str, bool)> {
    vec![
        ("Age >65", profile.is_elderly()),
        ("Renal impairment", profile.has_renal_impairment()),
        ("Hepatic impairment", profile.has_hepatic_impairment()),
        ("Alpha-blocker co-therapy", profile.takes(DrugClassId::AlphaBlockers)),
        ("CYP3A4 inhibitor present", profile.takes(DrugClassId::Cyp3a4Inhibitors)),
        ("Cardiovascular history", profile.has_heart_disease()),
        ("Pregnancy", profile.is_pregnant()),
    ]
}

fn needs_conservative_dosing(profile: &PatientProfile) -> bool {
    profile.is_elderly()
        || profile.has_renal_impairment()
        || profile.has_hepatic_impairment()
        || profile.takes(DrugClassId::AlphaBlockers)
        || profile.takes(DrugClassId::Cyp3a4Inhibitors)
        || profile.has_hypertension()
        || profile.has_heart_disease()
}

/// Derive the treatment plan. Any HIGH interaction or contraindication
/// defers pharmacotherapy; other risk factors only lower the dose.
pub fn derive_plan(profile: &PatientProfile, findings: &Findings) -> Plan {
    let blocked = findings.has_blocker();

    let (medication, dosage, duration) = if blocked {
        (NO_MEDICATION, NOT_APPLICABLE, NOT_APPLICABLE)
    } else if needs_conservative_dosing(profile) {
        (PREFERRED_MEDICATION, CONSERVATIVE_DOSAGE, CONSERVATIVE_DURATION)
    } else {
        (PREFERRED_MEDICATION, STANDARD_DOSAGE, STANDARD_DURATION)
    };

    let lead = if blocked { DEFERRED_CLAUSE } else { INDICATED_CLAUSE };
    let rationale = std::iter::once(lead)
        .chain(
            risk_clauses(profile)
                .into_iter()
                .filter_map(|(clause, present)| present.then_some(clause)),
        )
        .collect::<Vec<_>>()
        .join("; ");

    Plan {
        medication: medication.to_string(),
        dosage: dosage.to_string(),
        duration: duration.to_string(),
        rationale,
    }
}
