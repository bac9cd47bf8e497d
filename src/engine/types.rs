use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::lexicon::ConditionEntry;

// ---------------------------------------------------------------------------
// RiskTier
// ---------------------------------------------------------------------------

/// Triage urgency tier, shared by both scoring paths.
///
/// The vitals path and the text path historically used different label
/// vocabularies ("Low"/"Medium"/"High" vs "low"/"moderate"/"high"); both are
/// projections of this one enum, applied at the serialization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// Vitals-path label: "Low", "Medium", "High".
    pub fn vitals_label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Medium",
            Self::High => "High",
        }
    }

    /// Text-path label: "low", "moderate", "high".
    pub fn text_label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }

    /// Title-case label used for likelihoods and severity tables.
    pub fn title_label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    /// Parse any known tier label, case-insensitively.
    /// "medium" and "moderate" are the same tier.
    pub fn parse_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "moderate" => Some(Self::Moderate),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl std::str::FromStr for RiskTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s).ok_or_else(|| format!("unknown risk tier: {s}"))
    }
}

// Serde adapters for the two boundary vocabularies.

pub(crate) fn ser_vitals_tier<S: serde::Serializer>(
    tier: &RiskTier,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(tier.vitals_label())
}

pub(crate) fn ser_text_tier<S: serde::Serializer>(
    tier: &RiskTier,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(tier.text_label())
}

pub(crate) fn ser_title_tier<S: serde::Serializer>(
    tier: &RiskTier,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(tier.title_label())
}

pub(crate) fn de_tier<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<RiskTier, D::Error> {
    let s = String::deserialize(deserializer)?;
    RiskTier::parse_label(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown risk tier: {s}")))
}

// ---------------------------------------------------------------------------
// Department
// ---------------------------------------------------------------------------

/// Hospital department a patient is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Department {
    #[default]
    #[serde(rename = "General Medicine")]
    GeneralMedicine,
    Cardiology,
    Pulmonology,
    Neurology,
    Orthopedics,
    Emergency,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeneralMedicine => "General Medicine",
            Self::Cardiology => "Cardiology",
            Self::Pulmonology => "Pulmonology",
            Self::Neurology => "Neurology",
            Self::Orthopedics => "Orthopedics",
            Self::Emergency => "Emergency",
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Vitals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Structured intake vitals for one assessment call.
/// Immutable input; no identity or lifecycle beyond the call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    pub age: u32,
    pub gender: Gender,
    /// Systolic blood pressure, mmHg.
    pub systolic: i32,
    /// Diastolic blood pressure, mmHg.
    pub diastolic: i32,
    /// Heart rate, bpm.
    pub heart_rate: i32,
    /// Body temperature in degrees Celsius on this entry path.
    pub temperature: f64,
    /// Oxygen saturation, percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxygen_saturation: Option<u8>,
    /// Self-reported pain, 0-10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pain_level: Option<u8>,
    /// Free-form symptom strings, in reporting order.
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Pre-existing conditions.
    #[serde(default)]
    pub conditions: Vec<String>,
    /// Summaries extracted from uploaded medical records.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub medical_history: Vec<String>,
}

/// Field-level validation failure, raised by the caller before the scorer runs.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Vitals {
    /// Shape/range validation gate for callers. The scorer itself assumes
    /// validated input and never checks these.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.age > 130 {
            return Err(ValidationError::new("age", "must be between 0 and 130"));
        }
        if !(40..=300).contains(&self.systolic) {
            return Err(ValidationError::new(
                "systolic",
                "must be between 40 and 300 mmHg",
            ));
        }
        if !(20..=200).contains(&self.diastolic) {
            return Err(ValidationError::new(
                "diastolic",
                "must be between 20 and 200 mmHg",
            ));
        }
        if !(20..=300).contains(&self.heart_rate) {
            return Err(ValidationError::new(
                "heartRate",
                "must be between 20 and 300 bpm",
            ));
        }
        if !(25.0..=45.0).contains(&self.temperature) {
            return Err(ValidationError::new(
                "temperature",
                "must be between 25.0 and 45.0 °C",
            ));
        }
        if let Some(spo2) = self.oxygen_saturation {
            if spo2 > 100 {
                return Err(ValidationError::new(
                    "oxygenSaturation",
                    "must be between 0 and 100 percent",
                ));
            }
        }
        if let Some(pain) = self.pain_level {
            if pain > 10 {
                return Err(ValidationError::new(
                    "painLevel",
                    "must be between 0 and 10",
                ));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Guidance
// ---------------------------------------------------------------------------

/// Do/avoid/home-remedy guidance block attached to a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guidance {
    pub dos: Vec<String>,
    pub donts: Vec<String>,
    #[serde(default)]
    pub remedies: Vec<String>,
}

impl Guidance {
    /// Generic fallback guidance when no condition matched.
    pub fn generic() -> Self {
        Self {
            dos: vec![
                "Stay hydrated".into(),
                "Rest".into(),
                "Monitor symptoms".into(),
            ],
            donts: vec![
                "Avoid self-medication with antibiotics".into(),
                "Avoid strenuous activity".into(),
            ],
            remedies: vec![],
        }
    }
}

// ---------------------------------------------------------------------------
// Match and assessment results
// ---------------------------------------------------------------------------

/// Strength of association between the reported symptoms and one lexicon
/// condition. Transient: produced and discarded within a single call.
#[derive(Debug, Clone, Serialize)]
pub struct ConditionMatch<'a> {
    pub condition: &'a ConditionEntry,
    /// Normalized match strength in [0, 1].
    pub match_score: f64,
    /// The condition's required symptoms that found a counterpart.
    pub matched_symptoms: Vec<String>,
}

/// One row of the ranked condition list in a text-path assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCondition {
    pub name: String,
    /// "High" (score >= 0.7), "Moderate" (>= 0.4), else "Low".
    pub likelihood: String,
    /// Match score scaled to 0-100. Absent on the synthetic placeholder row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

/// Result of the structured-vitals scoring path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsAssessment {
    pub id: Uuid,
    #[serde(serialize_with = "ser_vitals_tier", deserialize_with = "de_tier")]
    pub risk_level: RiskTier,
    /// Calibration heuristic in [0.6, 0.99], rounded to 2 decimals.
    pub confidence_score: f64,
    pub recommended_department: Department,
    /// Human-readable triggered-rule strings; never empty.
    pub explanation: Vec<String>,
    pub assessed_at: NaiveDateTime,
}

/// Result of the free-text classification path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextAssessment {
    pub id: Uuid,
    #[serde(serialize_with = "ser_text_tier", deserialize_with = "de_tier")]
    pub risk: RiskTier,
    /// Ranked top-5 condition candidates; never empty (placeholder row when
    /// nothing matched).
    pub diseases: Vec<RankedCondition>,
    pub guidance: Guidance,
    /// 0-100 calibration heuristic.
    pub confidence: u32,
    pub assessed_at: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// PatientContext
// ---------------------------------------------------------------------------

/// Auxiliary free-text-path context. Accepted and forwarded to the remote
/// assessor; the local scorers do not currently weight it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional: Option<String>,
    /// Self-reported severity, 1-10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_ordering() {
        assert!(RiskTier::Low < RiskTier::Moderate);
        assert!(RiskTier::Moderate < RiskTier::High);
    }

    #[test]
    fn tier_labels_per_path() {
        assert_eq!(RiskTier::Moderate.vitals_label(), "Medium");
        assert_eq!(RiskTier::Moderate.text_label(), "moderate");
        assert_eq!(RiskTier::Moderate.title_label(), "Moderate");
        assert_eq!(RiskTier::High.vitals_label(), "High");
        assert_eq!(RiskTier::Low.text_label(), "low");
    }

    #[test]
    fn tier_parse_accepts_both_vocabularies() {
        assert_eq!(RiskTier::parse_label("HIGH"), Some(RiskTier::High));
        assert_eq!(RiskTier::parse_label("medium"), Some(RiskTier::Moderate));
        assert_eq!(RiskTier::parse_label("Moderate"), Some(RiskTier::Moderate));
        assert_eq!(RiskTier::parse_label(" low "), Some(RiskTier::Low));
        assert_eq!(RiskTier::parse_label("critical"), None);
    }

    #[test]
    fn department_display() {
        assert_eq!(Department::GeneralMedicine.to_string(), "General Medicine");
        assert_eq!(Department::Emergency.as_str(), "Emergency");
    }

    #[test]
    fn department_serializes_with_spaces() {
        let json = serde_json::to_string(&Department::GeneralMedicine).unwrap();
        assert_eq!(json, "\"General Medicine\"");
        let back: Department = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Department::GeneralMedicine);
    }

    fn valid_vitals() -> Vitals {
        Vitals {
            age: 45,
            gender: Gender::Male,
            systolic: 120,
            diastolic: 80,
            heart_rate: 72,
            temperature: 36.8,
            oxygen_saturation: Some(98),
            pain_level: Some(2),
            symptoms: vec!["Headache".into()],
            conditions: vec![],
            medical_history: vec![],
        }
    }

    #[test]
    fn validate_accepts_normal_vitals() {
        assert!(valid_vitals().validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_with_field_name() {
        let mut v = valid_vitals();
        v.systolic = 600;
        let err = v.validate().unwrap_err();
        assert_eq!(err.field, "systolic");

        let mut v = valid_vitals();
        v.pain_level = Some(11);
        assert_eq!(v.validate().unwrap_err().field, "painLevel");

        let mut v = valid_vitals();
        v.temperature = 102.0; // Fahrenheit value on the Celsius path
        assert_eq!(v.validate().unwrap_err().field, "temperature");
    }

    #[test]
    fn vitals_wire_field_names_are_camel_case() {
        let json = serde_json::to_value(valid_vitals()).unwrap();
        assert!(json.get("heartRate").is_some());
        assert!(json.get("oxygenSaturation").is_some());
        assert!(json.get("heart_rate").is_none());
    }

    #[test]
    fn vitals_assessment_wire_shape() {
        let a = VitalsAssessment {
            id: Uuid::new_v4(),
            risk_level: RiskTier::Moderate,
            confidence_score: 0.75,
            recommended_department: Department::Cardiology,
            explanation: vec!["Elevated Blood Pressure".into()],
            assessed_at: chrono::Local::now().naive_local(),
        };
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["riskLevel"], "Medium");
        assert_eq!(json["recommendedDepartment"], "Cardiology");
        assert_eq!(json["confidenceScore"], 0.75);
    }

    #[test]
    fn text_assessment_uses_lowercase_tier() {
        let a = TextAssessment {
            id: Uuid::new_v4(),
            risk: RiskTier::Moderate,
            diseases: vec![],
            guidance: Guidance::generic(),
            confidence: 60,
            assessed_at: chrono::Local::now().naive_local(),
        };
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["risk"], "moderate");
    }

    #[test]
    fn generic_guidance_contents() {
        let g = Guidance::generic();
        assert_eq!(g.dos.len(), 3);
        assert_eq!(g.donts.len(), 2);
        assert!(g.remedies.is_empty());
    }
}
