//! Keyword screening analyzer.
//!
//! A coarse rule engine over a free-text symptom description plus whatever
//! partial vitals are available. This is the local fallback invoked when the
//! remote ML scorer is unreachable, so it keeps its own thresholds —
//! including Fahrenheit temperature, unlike the Celsius vitals path.

use serde::{Deserialize, Serialize};

use super::types::{de_tier, ser_vitals_tier, Department, RiskTier};

const HIGH_THRESHOLD: i32 = 10;
const MEDIUM_THRESHOLD: i32 = 5;

static HIGH_RISK_KEYWORDS: &[&str] = &[
    "chest pain",
    "severe breathlessness",
    "unconscious",
    "stroke",
    "paralysis",
    "severe bleeding",
];

static MEDIUM_RISK_KEYWORDS: &[&str] = &[
    "fever",
    "dizziness",
    "vomiting",
    "fracture",
    "abdominal pain",
    "headache",
];

/// Partial vitals accepted by the screening analyzer. Every field is
/// optional; absent values simply skip their rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreeningVitals {
    pub heart_rate: Option<i32>,
    pub systolic_bp: Option<i32>,
    pub diastolic_bp: Option<i32>,
    /// Degrees Fahrenheit on this path.
    pub temperature: Option<f64>,
    pub oxygen_saturation: Option<i32>,
    /// 0-10 self-reported pain.
    pub pain_level: Option<u8>,
    /// Summaries from uploaded medical records.
    #[serde(default)]
    pub medical_history: Vec<String>,
}

/// Screening outcome: tier, routing, and the reasons that drove them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningResult {
    #[serde(serialize_with = "ser_vitals_tier", deserialize_with = "de_tier")]
    pub risk_level: RiskTier,
    pub department: Department,
    /// Never empty; a default line is substituted when no rule fires.
    pub reasoning: Vec<String>,
}

/// Run the screening rules over a symptom description and partial vitals.
pub fn analyze_patient(symptoms: &str, vitals: &ScreeningVitals) -> ScreeningResult {
    let mut score: i32 = 0;
    let mut reasons: Vec<String> = Vec::new();
    let mut department = Department::GeneralMedicine;

    // Critical vitals first.
    if let Some(hr) = vitals.heart_rate {
        if hr > 120 || hr < 40 {
            score += 10;
            reasons.push(format!("Critical Heart Rate: {hr} bpm"));
            department = Department::Cardiology;
        }
    }

    if let Some(systolic) = vitals.systolic_bp {
        if systolic > 180 || systolic < 90 {
            score += 10;
            reasons.push(format!("Critical Blood Pressure: {systolic} mmHg (Systolic)"));
            if department == Department::GeneralMedicine {
                department = Department::Cardiology;
            }
        }
    }

    if let Some(spo2) = vitals.oxygen_saturation {
        if spo2 < 90 {
            score += 10;
            reasons.push(format!("Low Oxygen Saturation: {spo2}%"));
            department = Department::Pulmonology;
        }
    }

    if let Some(temp) = vitals.temperature {
        if temp > 102.0 {
            score += 5;
            reasons.push(format!("High Fever: {temp}°F"));
        }
    }

    if let Some(pain) = vitals.pain_level {
        if pain >= 8 {
            score += 10;
            reasons.push(format!("Severe Pain (Level {pain})"));
        } else if pain >= 5 {
            score += 5;
            reasons.push(format!("Moderate Pain (Level {pain})"));
        }
    }

    // Medical history.
    if !vitals.medical_history.is_empty() {
        let history = vitals.medical_history.join(" ").to_lowercase();

        if history.contains("cardiac") || history.contains("heart") {
            score += 5;
            reasons.push("Risk elevated due to history of cardiac issues.".into());
            if department == Department::GeneralMedicine {
                department = Department::Cardiology;
            }
        }
        if history.contains("diabetic") || history.contains("diabetes") {
            score += 3;
            reasons.push("Risk elevated due to history of diabetes.".into());
        }
        if history.contains("asthma") || history.contains("respiratory") {
            score += 3;
            reasons.push("Risk elevated due to respiratory history.".into());
            if department == Department::GeneralMedicine {
                department = Department::Pulmonology;
            }
        }
    }

    // Symptom keywords: department routing, then severity keywords.
    let lower = symptoms.to_lowercase();

    if lower.contains("chest") || lower.contains("heart") {
        if department == Department::GeneralMedicine {
            department = Department::Cardiology;
        }
    }
    if lower.contains("stroke") || lower.contains("paralysis") || lower.contains("headache") {
        if department == Department::GeneralMedicine {
            department = Department::Neurology;
        }
    }
    if lower.contains("fracture") || lower.contains("bone") || lower.contains("joint") {
        if department == Department::GeneralMedicine {
            department = Department::Orthopedics;
        }
    }

    if let Some(kw) = HIGH_RISK_KEYWORDS.iter().find(|kw| lower.contains(*kw)) {
        score += 10;
        reasons.push(format!("High risk symptom detected: \"{kw}\""));
    } else if let Some(kw) = MEDIUM_RISK_KEYWORDS.iter().find(|kw| lower.contains(*kw)) {
        score += 5;
        reasons.push(format!("Moderate risk symptom detected: \"{kw}\""));
    }

    let risk_level = if score >= HIGH_THRESHOLD {
        RiskTier::High
    } else if score >= MEDIUM_THRESHOLD {
        RiskTier::Moderate
    } else {
        RiskTier::Low
    };

    if reasons.is_empty() {
        reasons.push("No critical signs or specific high-risk symptoms detected.".into());
    }

    tracing::debug!(
        score,
        risk = risk_level.vitals_label(),
        department = %department,
        "Screening analysis complete"
    );

    ScreeningResult {
        risk_level,
        department,
        reasoning: reasons,
    }
}
