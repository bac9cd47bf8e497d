//! Remote "advanced assessment" with transparent local fallback.
//!
//! The remote service returns a richer report than the local text path: a
//! symptom-by-symptom severity table and a named condition probability on
//! top of the usual tier/conditions/guidance. The shape is purely additive;
//! on any call or parse failure the report is synthesized from the local
//! classifier instead.

use serde::{Deserialize, Serialize};

use crate::config;
use crate::engine::classify::classify;
use crate::engine::extract::extract_symptoms;
use crate::engine::lexicon::Lexicon;
use crate::engine::types::{
    de_tier, ser_text_tier, ser_title_tier, Guidance, PatientContext, RiskTier,
};

use super::{map_transport_error, RemoteError};

#[derive(Serialize)]
struct AssessRequest<'a> {
    symptoms: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    patient: Option<&'a PatientContext>,
}

/// One row of the symptom severity table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomAnalysis {
    pub symptom: String,
    #[serde(serialize_with = "ser_title_tier", deserialize_with = "de_tier")]
    pub risk: RiskTier,
    /// Severity 1-10.
    pub severity: u8,
    /// "Low" / "Medium" / "High".
    pub priority: String,
}

/// The single strongest named condition with a percentage string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseProbability {
    pub name: String,
    /// e.g. "85%".
    pub probability: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PossibleCondition {
    pub name: String,
    /// "Low" / "Moderate" / "High".
    pub confidence: String,
}

/// Extended assessment report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvancedReport {
    #[serde(serialize_with = "ser_text_tier", deserialize_with = "de_tier")]
    pub risk: RiskTier,
    #[serde(default)]
    pub symptom_analysis: Vec<SymptomAnalysis>,
    #[serde(default)]
    pub disease_probability: Option<DiseaseProbability>,
    #[serde(default)]
    pub possible_conditions: Vec<PossibleCondition>,
    pub guidance: Guidance,
    #[serde(default)]
    pub urgency: String,
    #[serde(default)]
    pub notes: String,
}

/// Seam for the remote assessor.
pub trait AdvancedAssessor {
    fn assess(
        &self,
        symptoms: &str,
        patient: Option<&PatientContext>,
    ) -> Result<AdvancedReport, RemoteError>;
}

/// HTTP client for the remote assessor's `/assess` endpoint.
pub struct HttpAdvancedAssessor {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpAdvancedAssessor {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// Client configured from the environment (`ACUITY_ADVANCED_URL`,
    /// `ACUITY_REMOTE_TIMEOUT_SECS`).
    pub fn from_env() -> Self {
        Self::new(
            &config::advanced_service_url(),
            config::remote_timeout_secs(),
        )
    }
}

impl AdvancedAssessor for HttpAdvancedAssessor {
    fn assess(
        &self,
        symptoms: &str,
        patient: Option<&PatientContext>,
    ) -> Result<AdvancedReport, RemoteError> {
        let url = format!("{}/assess", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&AssessRequest { symptoms, patient })
            .send()
            .map_err(|e| map_transport_error(e, &self.base_url, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RemoteError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .map_err(|e| RemoteError::ResponseParsing(e.to_string()))
    }
}

/// Mock assessor for tests: a canned report, or unconditional failure.
pub struct MockAdvancedAssessor {
    report: Option<AdvancedReport>,
}

impl MockAdvancedAssessor {
    pub fn new(report: AdvancedReport) -> Self {
        Self {
            report: Some(report),
        }
    }

    pub fn failing() -> Self {
        Self { report: None }
    }
}

impl AdvancedAssessor for MockAdvancedAssessor {
    fn assess(
        &self,
        _symptoms: &str,
        _patient: Option<&PatientContext>,
    ) -> Result<AdvancedReport, RemoteError> {
        self.report
            .clone()
            .ok_or_else(|| RemoteError::Connection("mock".into()))
    }
}

/// Request the extended report remotely; on any failure, synthesize it from
/// the local classifier so the caller always receives the same shape.
pub fn advanced_assess_with_fallback(
    assessor: &dyn AdvancedAssessor,
    lexicon: &Lexicon,
    symptoms: &str,
    patient: Option<&PatientContext>,
) -> AdvancedReport {
    match assessor.assess(symptoms, patient) {
        Ok(report) => report,
        Err(e) => {
            tracing::warn!(error = %e, "Advanced assessor unavailable, using local classifier");
            local_report(lexicon, symptoms)
        }
    }
}

/// Build the extended report from the local text path.
fn local_report(lexicon: &Lexicon, symptoms: &str) -> AdvancedReport {
    let assessment = classify(lexicon, symptoms);
    let extracted = extract_symptoms(lexicon, symptoms);

    let symptom_analysis: Vec<SymptomAnalysis> = extracted
        .iter()
        .filter_map(|name| lexicon.find_symptom(name))
        .map(|entry| SymptomAnalysis {
            symptom: entry.name.clone(),
            risk: entry.risk_level,
            severity: match entry.risk_level {
                RiskTier::Low => 3,
                RiskTier::Moderate => 5,
                RiskTier::High => 8,
            },
            priority: entry.risk_level.vitals_label().to_string(),
        })
        .collect();

    let top = assessment.diseases.first();
    let disease_probability = top.and_then(|d| {
        d.score.map(|score| DiseaseProbability {
            name: d.name.clone(),
            probability: format!("{score}%"),
            description: "Strongest match from the local condition dictionary.".into(),
        })
    });

    let possible_conditions = assessment
        .diseases
        .iter()
        .map(|d| PossibleCondition {
            name: d.name.clone(),
            confidence: d.likelihood.clone(),
        })
        .collect();

    let urgency = match assessment.risk {
        RiskTier::High => "Seek medical care promptly",
        RiskTier::Moderate => "Schedule a consultation soon",
        RiskTier::Low => "Self-care and monitoring",
    }
    .to_string();

    AdvancedReport {
        risk: assessment.risk,
        symptom_analysis,
        disease_probability,
        possible_conditions,
        guidance: assessment.guidance,
        urgency,
        notes: "Generated by the local triage engine (remote assessment unavailable).".into(),
    }
}
