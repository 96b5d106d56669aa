use rocky_core::models::finding::NO_ISSUES;
use rocky_core::models::patient::PatientInput;
use rocky_core::models::result::Source;
use rocky_core::models::severity::{RiskLevel, Severity};
use rocky_engine::evaluate;
use rocky_engine::plan::{CONSERVATIVE_DOSAGE, CONSERVATIVE_DURATION, STANDARD_DOSAGE};

fn contains_issue(issues: &[String], needle: &str) -> bool {
    issues.iter().any(|i| i.contains(needle))
}

fn meds(text: &str) -> PatientInput {
    PatientInput {
        medications: text.to_string(),
        ..Default::default()
    }
}

fn conditions(labels: &[&str]) -> PatientInput {
    PatientInput {
        conditions: labels.iter().map(|l| l.to_string()).collect(),
        ..Default::default()
    }
}

#[test]
fn no_findings_reports_the_low_baseline() {
    let result = evaluate(&PatientInput::default());
    assert_eq!(result.risk_score, 12);
    assert_eq!(result.risk_level, RiskLevel::Low);
    assert_eq!(result.issues, vec![NO_ISSUES.to_string()]);
    assert_eq!(result.plan.medication, "Tadalafil");
    assert_eq!(result.plan.dosage, STANDARD_DOSAGE);
    assert_eq!(result.plan.duration, "90 Days");
    assert_eq!(result.source, Source::Rules);
    // Confidence follows the formula score of 5, not the reported 12.
    assert!((result.confidence_score - (1.0 - 5.0 / 120.0)).abs() < 1e-9);
    assert_eq!(result.recommendation_confidence.plan, result.confidence_score);
    assert_eq!(result.alternatives.len(), 3);
}

#[test]
fn nitroglycerin_alone_blocks_treatment() {
    let result = evaluate(&meds("Nitroglycerin"));
    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.plan.medication, "None");
    assert_eq!(result.plan.dosage, "N/A");
    assert_eq!(result.plan.duration, "N/A");
    assert_eq!(result.risk_score, 45);
    assert!(result.interactions.is_empty());
    assert_eq!(result.contraindications[0].condition_or_allergy, "Nitrate therapy");
    assert_eq!(result.recommendation_confidence.plan, 0.4);
    assert!(result.plan.rationale.starts_with("Safety blockers present"));

    let options: Vec<_> = result.alternatives.iter().map(|a| a.option.as_str()).collect();
    assert_eq!(options, vec!["Vacuum erection device", "Specialist referral"]);
}

#[test]
fn nitrate_with_pde5_fires_both_checks() {
    let result = evaluate(&meds("Isosorbide mononitrate; Sildenafil 50mg"));
    let pairs: Vec<_> = result.interactions.iter().map(|i| i.pair.as_str()).collect();
    assert_eq!(pairs, vec!["Nitrates + PDE5i", "nitrates+pde5i"]);
    assert!(result.interactions.iter().all(|i| i.severity == Severity::High));
    assert_eq!(result.plan.medication, "None");
    assert_eq!(result.risk_level, RiskLevel::High);
    // 5 + 40 + 40 + 40 clamps to 100.
    assert_eq!(result.risk_score, 100);
    assert_eq!(result.confidence_score, 0.6);
}

#[test]
fn hypertension_with_normal_reading_is_medium_and_conservative() {
    let mut input = conditions(&["Hypertension"]);
    input.bp_systolic = 140.0;
    input.bp_diastolic = 90.0;

    let result = evaluate(&input);
    assert_eq!(result.risk_level, RiskLevel::Medium);
    assert_eq!(result.risk_score, 25);
    assert!(result.plan.dosage.contains("2.5mg"));
    assert_eq!(result.plan.duration, CONSERVATIVE_DURATION);
    assert_eq!(
        result.plan.rationale,
        "PDE5 inhibitor indicated; starting conservatively due to risk factors."
    );
}

#[test]
fn severe_blood_pressure_is_a_high_contraindication() {
    let result = evaluate(&PatientInput {
        bp_systolic: 180.0,
        bp_diastolic: 115.0,
        ..Default::default()
    });
    assert_eq!(result.risk_level, RiskLevel::High);
    assert!(contains_issue(&result.issues, "Severely elevated BP"));
    assert_eq!(result.plan.medication, "None");
}

#[test]
fn elevated_blood_pressure_is_medium() {
    let result = evaluate(&PatientInput {
        bp_systolic: 120.0,
        bp_diastolic: 96.0,
        ..Default::default()
    });
    assert_eq!(result.contraindications.len(), 1);
    assert_eq!(result.contraindications[0].condition_or_allergy, "Elevated BP");
    assert_eq!(result.contraindications[0].severity, Severity::Medium);
    assert_eq!(result.risk_level, RiskLevel::Medium);
}

#[test]
fn bmi_and_lifestyle_concerns_carry_their_severities() {
    let result = evaluate(&PatientInput {
        bmi: 36.0,
        smoking: "current".to_string(),
        alcohol: "heavy".to_string(),
        ..Default::default()
    });
    assert!(contains_issue(&result.issues, "[MEDIUM] Dosing: Obesity (BMI ≥35)"));
    assert!(contains_issue(&result.issues, "[LOW] Dosing: Smoking"));
    assert!(contains_issue(&result.issues, "[MEDIUM] Dosing: Heavy alcohol"));
    assert_eq!(result.risk_score, 55);
    assert_eq!(result.risk_level, RiskLevel::Medium);
}

#[test]
fn overweight_and_sedentary_are_low() {
    let result = evaluate(&PatientInput {
        bmi: 31.0,
        exercise: "None".to_string(),
        ..Default::default()
    });
    let factors: Vec<_> = result.dosing_concerns.iter().map(|d| d.factor.as_str()).collect();
    assert_eq!(factors, vec!["Overweight (BMI ≥30)", "Sedentary"]);
    assert!(result.dosing_concerns.iter().all(|d| d.severity == Severity::Low));
    assert_eq!(result.risk_score, 25);
    assert_eq!(result.risk_level, RiskLevel::Low);
}

#[test]
fn derived_bmi_is_used_when_none_is_given() {
    let result = evaluate(&PatientInput {
        weight: 120.0,
        height: 180.0,
        ..Default::default()
    });
    assert!(contains_issue(&result.issues, "Obesity (BMI ≥35)"));
}

#[test]
fn alpha_blocker_overlap_is_counted_twice() {
    let result = evaluate(&meds("Tamsulosin, Tadalafil"));
    let pairs: Vec<_> = result.interactions.iter().map(|i| i.pair.as_str()).collect();
    assert_eq!(pairs, vec!["Alpha-blocker + PDE5i", "alphaBlockers+pde5i"]);
    assert_eq!(result.risk_score, 45);
    assert_eq!(result.risk_level, RiskLevel::Medium);
    assert_eq!(result.plan.dosage, CONSERVATIVE_DOSAGE);
    assert!(result.plan.rationale.ends_with("; Alpha-blocker co-therapy"));
}

#[test]
fn cyp3a4_inhibitor_lowers_dose() {
    let result = evaluate(&meds("ritonavir, vardenafil"));
    assert_eq!(result.interactions.len(), 2);
    assert_eq!(result.plan.dosage, CONSERVATIVE_DOSAGE);
    assert!(result.plan.rationale.contains("CYP3A4 inhibitor present"));
}

#[test]
fn renal_impairment_yields_two_dosing_entries() {
    let result = evaluate(&conditions(&["Kidney Disease"]));
    let factors: Vec<_> = result.dosing_concerns.iter().map(|d| d.factor.as_str()).collect();
    assert_eq!(factors, vec!["kidney disease", "Renal impairment"]);
    assert_eq!(result.risk_score, 45);
    assert!(result.plan.rationale.contains("Renal impairment"));
}

#[test]
fn pregnancy_rule_requires_a_pde5_inhibitor() {
    let without = evaluate(&conditions(&["pregnant"]));
    assert_eq!(without.contraindications.len(), 1);
    assert_eq!(without.contraindications[0].condition_or_allergy, "Pregnancy");

    let mut input = conditions(&["pregnant"]);
    input.medications = "sildenafil".to_string();
    let with = evaluate(&input);
    let subjects: Vec<_> = with
        .contraindications
        .iter()
        .map(|c| c.condition_or_allergy.as_str())
        .collect();
    assert_eq!(subjects, vec!["pregnant", "Pregnancy"]);
    // Pregnancy is named in the rationale but does not lower the dose.
    assert_eq!(with.plan.dosage, STANDARD_DOSAGE);
    assert!(with.plan.rationale.ends_with("; Pregnancy"));
}

#[test]
fn allergies_to_either_class_block() {
    for allergy in ["Sildenafil", "nitroglycerin spray"] {
        let result = evaluate(&PatientInput {
            allergies: allergy.to_string(),
            ..Default::default()
        });
        assert_eq!(result.plan.medication, "None", "allergy {allergy}");
        assert_eq!(result.risk_level, RiskLevel::High);
    }
}

#[test]
fn rationale_clauses_follow_fixed_order() {
    let result = evaluate(&PatientInput {
        age: 70,
        conditions: vec![
            "heart disease".to_string(),
            "liver disease".to_string(),
            "kidney disease".to_string(),
        ],
        medications: "doxazosin, clarithromycin".to_string(),
        ..Default::default()
    });
    assert_eq!(
        result.plan.rationale,
        "PDE5 inhibitor indicated; starting conservatively due to risk factors.; \
         Age >65; Renal impairment; Hepatic impairment; Alpha-blocker co-therapy; \
         CYP3A4 inhibitor present; Cardiovascular history"
    );
}

#[test]
fn score_is_clamped_for_everything_at_once() {
    let result = evaluate(&PatientInput {
        age: 90,
        bmi: 45.0,
        bp_systolic: 210.0,
        bp_diastolic: 130.0,
        smoking: "current".to_string(),
        alcohol: "heavy".to_string(),
        exercise: "none".to_string(),
        conditions: vec![
            "pregnant".to_string(),
            "kidney disease".to_string(),
            "liver disease".to_string(),
            "heart disease".to_string(),
            "hypertension".to_string(),
        ],
        medications: "nitroglycerin, isosorbide, tadalafil, sildenafil, tamsulosin, \
                      ketoconazole, ritonavir"
            .to_string(),
        allergies: "avanafil, isosorbide".to_string(),
        ..Default::default()
    });
    assert_eq!(result.risk_score, 100);
    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.confidence_score, 0.6);
}

#[test]
fn any_high_finding_means_high_level() {
    for input in [
        meds("nitroglycerin"),
        PatientInput {
            bp_diastolic: 110.0,
            ..Default::default()
        },
        PatientInput {
            allergies: "tadalafil".to_string(),
            ..Default::default()
        },
    ] {
        let result = evaluate(&input);
        let has_high = result
            .interactions
            .iter()
            .map(|i| i.severity)
            .chain(result.contraindications.iter().map(|c| c.severity))
            .chain(result.dosing_concerns.iter().map(|d| d.severity))
            .any(|s| s == Severity::High);
        assert!(has_high);
        assert_eq!(result.risk_level, RiskLevel::High);
    }
}

#[test]
fn result_serializes_with_wire_field_names() {
    let value = serde_json::to_value(evaluate(&meds("Nitroglycerin"))).unwrap();
    for key in [
        "riskScore",
        "riskLevel",
        "issues",
        "interactions",
        "contraindications",
        "dosingConcerns",
        "plan",
        "alternatives",
        "confidenceScore",
        "recommendationConfidence",
        "source",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert_eq!(value["riskLevel"], "HIGH");
    assert_eq!(value["source"], "rules");
    assert_eq!(value["recommendationConfidence"]["plan"], 0.4);
    assert_eq!(value["contraindications"][0]["conditionOrAllergy"], "Nitrate therapy");
}
