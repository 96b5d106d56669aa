use rocky_core::models::finding::Findings;
use rocky_core::models::severity::{RiskLevel, Severity};

/// Score before any finding is counted.
pub const BASE_SCORE: u32 = 5;
/// Reported score when nothing was found.
pub const NO_FINDINGS_SCORE: u8 = 12;
pub const MAX_SCORE: u8 = 100;

/// Score thresholds for the risk bands.
pub const HIGH_THRESHOLD: u8 = 60;
pub const MEDIUM_THRESHOLD: u8 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskAssessment {
    /// `clamp(5 + Σ weights, 0, 100)`, before the no-findings override.
    pub formula_score: u8,
    /// The score reported to callers.
    pub score: u8,
    pub level: RiskLevel,
    pub max_severity: Severity,
}

/// Band a score given the most severe finding.
pub fn risk_level(max_severity: Severity, score: u8) -> RiskLevel {
    if max_severity == Severity::High || score >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if max_severity == Severity::Medium || score >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn assess(findings: &Findings) -> RiskAssessment {
    let total = findings
        .severities()
        .fold(BASE_SCORE, |acc, s| acc.saturating_add(s.weight()));
    let formula_score = total.min(u32::from(MAX_SCORE)) as u8;
    let max_severity = findings.max_severity();

    if findings.is_empty() {
        return RiskAssessment {
            formula_score,
            score: NO_FINDINGS_SCORE,
            level: RiskLevel::Low,
            max_severity,
        };
    }

    RiskAssessment {
        formula_score,
        score: formula_score,
        level: risk_level(max_severity, formula_score),
        max_severity,
    }
}
