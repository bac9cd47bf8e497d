//! Additive vitals rule scorer.
//!
//! Each rule is evaluated independently (rules are not mutually exclusive)
//! and contributes points plus a human-readable explanation string when it
//! fires. The rule order is load-bearing: department assignment is
//! last-write-wins across the symptom-keyword checks.

use chrono::Local;
use uuid::Uuid;

use super::types::{Department, RiskTier, Vitals, VitalsAssessment};

const HIGH_THRESHOLD: u32 = 70;
const MEDIUM_THRESHOLD: u32 = 30;

/// Score structured vitals plus the symptom keyword list.
///
/// Assumes caller-validated input (`Vitals::validate`); never fails.
/// Temperature thresholds on this path are Celsius.
pub fn assess_vitals(vitals: &Vitals) -> VitalsAssessment {
    let mut score: u32 = 0;
    let mut explanation: Vec<String> = Vec::new();
    let mut department = Department::GeneralMedicine;

    // Blood pressure: critical band supersedes the elevated band.
    if vitals.systolic > 160 || vitals.diastolic > 100 {
        score += 30;
        explanation.push("Critical Hypertension (BP > 160/100)".into());
    } else if vitals.systolic > 140 || vitals.diastolic > 90 {
        score += 15;
        explanation.push("Elevated Blood Pressure".into());
    }

    if vitals.heart_rate > 120 || vitals.heart_rate < 40 {
        score += 25;
        explanation.push("Abnormal Heart Rate (>120 or <40)".into());
    }

    if vitals.temperature > 39.5 {
        score += 20;
        explanation.push("High Fever (>39.5°C)".into());
    }

    // Weighted symptom keywords. Whichever group matches last overwrites
    // the department.
    let symptoms_lower: Vec<String> = vitals.symptoms.iter().map(|s| s.to_lowercase()).collect();
    let any = |pred: &dyn Fn(&str) -> bool| symptoms_lower.iter().any(|s| pred(s));

    if any(&|s| s.contains("chest") && s.contains("pain")) {
        score += 50;
        explanation.push("Chest Pain reported".into());
        department = Department::Cardiology;
    }

    if any(&|s| s.contains("breath") || s.contains("shortness")) {
        score += 40;
        explanation.push("Difficulty Breathing".into());
        department = Department::Pulmonology;
    }

    if any(&|s| s.contains("numb") || s.contains("speech") || s.contains("vision")) {
        score += 45;
        explanation.push("Neurological Symptoms".into());
        department = Department::Neurology;
    }

    if any(&|s| s.contains("bleed") || s.contains("trauma")) {
        score += 40;
        explanation.push("Trauma/Bleeding".into());
        department = Department::Emergency;
    }

    if vitals.age > 65 {
        score += 10;
        explanation.push("Age > 65 (Risk Factor)".into());
    }

    let risk_level = if score >= HIGH_THRESHOLD {
        RiskTier::High
    } else if score >= MEDIUM_THRESHOLD {
        RiskTier::Moderate
    } else {
        RiskTier::Low
    };

    // High risk with no department-specific keyword goes to Emergency.
    if risk_level == RiskTier::High && department == Department::GeneralMedicine {
        department = Department::Emergency;
    }

    let confidence_score = confidence_for(score);

    if risk_level == RiskTier::High {
        tracing::warn!(
            score,
            department = %department,
            "High-risk vitals assessment"
        );
    }

    VitalsAssessment {
        id: Uuid::new_v4(),
        risk_level,
        confidence_score,
        recommended_department: department,
        explanation: if explanation.is_empty() {
            vec!["Routine Checkup Recommended".into()]
        } else {
            explanation
        },
        assessed_at: Local::now().naive_local(),
    }
}

/// Calibration heuristic, not a statistical estimate:
/// `min(0.6 + score/200, 0.99)`, rounded to 2 decimals.
fn confidence_for(score: u32) -> f64 {
    let raw = (0.6 + score as f64 / 200.0).min(0.99);
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Gender;

    fn vitals(age: u32, systolic: i32, diastolic: i32, hr: i32, temp: f64, symptoms: &[&str]) -> Vitals {
        Vitals {
            age,
            gender: Gender::Other,
            systolic,
            diastolic,
            heart_rate: hr,
            temperature: temp,
            oxygen_saturation: None,
            pain_level: None,
            symptoms: symptoms.iter().map(|s| (*s).into()).collect(),
            conditions: vec![],
            medical_history: vec![],
        }
    }

    /// 15 (BP) + 50 (chest pain) + 40 (breathing) = 105 -> High; the
    /// breathing rule is evaluated after the chest rule, so Pulmonology wins.
    #[test]
    fn scenario_cardiac_respiratory() {
        let v = vitals(45, 150, 95, 110, 37.5, &["Chest pain", "Shortness of breath"]);
        let a = assess_vitals(&v);
        assert_eq!(a.risk_level, RiskTier::High);
        assert_eq!(a.recommended_department, Department::Pulmonology);
        assert_eq!(a.confidence_score, 0.99);
        assert!(a.explanation.contains(&"Chest Pain reported".to_string()));
        assert!(a.explanation.contains(&"Difficulty Breathing".to_string()));
    }

    /// 30 (critical BP) + 45 (neuro) + 10 (age) = 85 -> High, Neurology.
    #[test]
    fn scenario_stroke_pattern() {
        let v = vitals(72, 165, 105, 88, 37.0, &["Slurred speech", "Numbness"]);
        let a = assess_vitals(&v);
        assert_eq!(a.risk_level, RiskTier::High);
        assert_eq!(a.recommended_department, Department::Neurology);
        assert_eq!(a.confidence_score, 0.99);
    }

    /// Nothing fires: score 0 -> Low, General Medicine, floor confidence.
    #[test]
    fn scenario_routine() {
        let v = vitals(28, 120, 80, 72, 36.8, &["Headache", "Nausea"]);
        let a = assess_vitals(&v);
        assert_eq!(a.risk_level, RiskTier::Low);
        assert_eq!(a.recommended_department, Department::GeneralMedicine);
        assert_eq!(a.confidence_score, 0.6);
        assert_eq!(a.explanation, vec!["Routine Checkup Recommended"]);
    }

    #[test]
    fn heart_rate_boundaries_are_strict() {
        // 120 and 40 are inside the normal band.
        let a = assess_vitals(&vitals(30, 120, 80, 120, 37.0, &[]));
        assert!(!a.explanation.iter().any(|e| e.contains("Heart Rate")));
        let a = assess_vitals(&vitals(30, 120, 80, 40, 37.0, &[]));
        assert!(!a.explanation.iter().any(|e| e.contains("Heart Rate")));
        let a = assess_vitals(&vitals(30, 120, 80, 121, 37.0, &[]));
        assert!(a.explanation.iter().any(|e| e.contains("Heart Rate")));
        let a = assess_vitals(&vitals(30, 120, 80, 39, 37.0, &[]));
        assert!(a.explanation.iter().any(|e| e.contains("Heart Rate")));
    }

    #[test]
    fn critical_bp_band_supersedes_elevated() {
        let a = assess_vitals(&vitals(30, 165, 80, 72, 37.0, &[]));
        assert_eq!(a.explanation, vec!["Critical Hypertension (BP > 160/100)"]);
        let a = assess_vitals(&vitals(30, 145, 80, 72, 37.0, &[]));
        assert_eq!(a.explanation, vec!["Elevated Blood Pressure"]);
    }

    #[test]
    fn chest_and_pain_must_cooccur_in_one_symptom() {
        // Separate strings do not trigger the cardiology rule.
        let a = assess_vitals(&vitals(30, 120, 80, 72, 37.0, &["chest tightness", "leg pain"]));
        assert!(!a.explanation.iter().any(|e| e.contains("Chest Pain")));
        let a = assess_vitals(&vitals(30, 120, 80, 72, 37.0, &["chest pain"]));
        assert_eq!(a.recommended_department, Department::Cardiology);
    }

    #[test]
    fn trauma_keyword_routes_to_emergency() {
        let a = assess_vitals(&vitals(30, 120, 80, 72, 37.0, &["heavy bleeding from arm"]));
        assert_eq!(a.recommended_department, Department::Emergency);
        assert!(a.explanation.contains(&"Trauma/Bleeding".to_string()));
    }

    /// High tier without any keyword-assigned department forces Emergency.
    #[test]
    fn high_risk_without_department_overrides_to_emergency() {
        // 30 (BP) + 25 (HR) + 20 (temp) = 75 -> High with no symptom rule.
        let a = assess_vitals(&vitals(30, 170, 80, 130, 40.0, &[]));
        assert_eq!(a.risk_level, RiskTier::High);
        assert_eq!(a.recommended_department, Department::Emergency);
    }

    #[test]
    fn medium_band() {
        // 30 points exactly: Medium.
        let a = assess_vitals(&vitals(30, 170, 80, 72, 37.0, &[]));
        assert_eq!(a.risk_level, RiskTier::Moderate);
        assert_eq!(a.risk_level.vitals_label(), "Medium");
        // 25 points: Low.
        let a = assess_vitals(&vitals(30, 120, 80, 130, 37.0, &[]));
        assert_eq!(a.risk_level, RiskTier::Low);
    }

    #[test]
    fn confidence_is_monotonic_and_bounded() {
        let scores = [0u32, 10, 30, 50, 70, 78, 80, 100, 200];
        let mut last = 0.0;
        for s in scores {
            let c = confidence_for(s);
            assert!((0.6..=0.99).contains(&c), "confidence {c} out of range");
            assert!(c >= last, "confidence must be non-decreasing");
            last = c;
        }
        assert_eq!(confidence_for(0), 0.6);
        assert_eq!(confidence_for(78), 0.99);
        assert_eq!(confidence_for(200), 0.99);
    }

    #[test]
    fn age_rule_is_strictly_over_65() {
        let a = assess_vitals(&vitals(65, 120, 80, 72, 37.0, &[]));
        assert!(!a.explanation.iter().any(|e| e.contains("Age")));
        let a = assess_vitals(&vitals(66, 120, 80, 72, 37.0, &[]));
        assert!(a.explanation.iter().any(|e| e.contains("Age > 65")));
    }

    #[test]
    fn fever_threshold_is_celsius_and_strict() {
        let a = assess_vitals(&vitals(30, 120, 80, 72, 39.5, &[]));
        assert!(!a.explanation.iter().any(|e| e.contains("Fever")));
        let a = assess_vitals(&vitals(30, 120, 80, 72, 39.6, &[]));
        assert!(a.explanation.iter().any(|e| e.contains("High Fever")));
    }
}
