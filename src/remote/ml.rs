//! Remote ML risk scorer with transparent local fallback.
//!
//! The scorer is engine-shaped: it receives numeric features and returns a
//! risk level plus per-feature attributions. Department routing is derived
//! locally from symptom keywords because the model does not provide it.

use serde::{Deserialize, Serialize};

use crate::config;
use crate::engine::screening::{analyze_patient, ScreeningResult, ScreeningVitals};
use crate::engine::types::{Department, RiskTier};

use super::{map_transport_error, RemoteError};

/// Feature vector sent to the remote scorer. Missing vitals take the
/// reference defaults (resting adult baselines).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlFeatures {
    pub age: u32,
    pub heart_rate: i32,
    pub blood_pressure_systolic: i32,
    pub blood_pressure_diastolic: i32,
    pub temperature: f64,
    pub oxygen_saturation: i32,
}

impl MlFeatures {
    pub fn from_screening(age: Option<u32>, vitals: &ScreeningVitals) -> Self {
        Self {
            age: age.unwrap_or(35),
            heart_rate: vitals.heart_rate.unwrap_or(75),
            blood_pressure_systolic: vitals.systolic_bp.unwrap_or(120),
            blood_pressure_diastolic: vitals.diastolic_bp.unwrap_or(80),
            temperature: vitals.temperature.unwrap_or(37.0),
            oxygen_saturation: vitals.oxygen_saturation.unwrap_or(98),
        }
    }
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    features: &'a MlFeatures,
}

/// One attribution row from the remote model.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TopFeature {
    pub name: String,
    pub direction: String,
    pub impact: f64,
}

/// Remote scorer response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MlPrediction {
    pub risk_level: String,
    #[serde(default)]
    pub top_features: Vec<TopFeature>,
    /// True when the service answered from its stub model rather than a
    /// trained one. The provenance tag derived from this must be preserved.
    #[serde(default)]
    pub mock: bool,
}

/// Seam for the remote ML scorer.
pub trait MlScorer {
    fn predict(&self, features: &MlFeatures) -> Result<MlPrediction, RemoteError>;
}

/// HTTP client for the remote scorer's `/predict` endpoint.
pub struct HttpMlScorer {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpMlScorer {
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

    /// Client configured from the environment (`ACUITY_ML_URL`,
    /// `ACUITY_REMOTE_TIMEOUT_SECS`).
    pub fn from_env() -> Self {
        Self::new(&config::ml_service_url(), config::remote_timeout_secs())
    }
}

impl MlScorer for HttpMlScorer {
    fn predict(&self, features: &MlFeatures) -> Result<MlPrediction, RemoteError> {
        let url = format!("{}/predict", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&PredictRequest { features })
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

/// Mock scorer for tests: a canned prediction, or unconditional failure.
pub struct MockMlScorer {
    prediction: Option<MlPrediction>,
}

impl MockMlScorer {
    pub fn new(prediction: MlPrediction) -> Self {
        Self {
            prediction: Some(prediction),
        }
    }

    /// A scorer that always fails, for exercising the fallback path.
    pub fn failing() -> Self {
        Self { prediction: None }
    }
}

impl MlScorer for MockMlScorer {
    fn predict(&self, _features: &MlFeatures) -> Result<MlPrediction, RemoteError> {
        self.prediction
            .clone()
            .ok_or_else(|| RemoteError::Connection("mock".into()))
    }
}

/// Score via the remote model, falling back to the local screening analyzer
/// on any error, non-success status, timeout, or unparseable tier. The
/// fallback is transparent: same output contract either way.
pub fn assess_with_fallback(
    scorer: &dyn MlScorer,
    symptoms: &str,
    age: Option<u32>,
    vitals: &ScreeningVitals,
) -> ScreeningResult {
    let features = MlFeatures::from_screening(age, vitals);

    let prediction = match scorer.predict(&features) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(error = %e, "ML service unavailable, using rule-based fallback");
            return analyze_patient(symptoms, vitals);
        }
    };

    let Some(risk_level) = RiskTier::parse_label(&prediction.risk_level) else {
        tracing::warn!(
            risk_level = %prediction.risk_level,
            "ML service returned unknown risk tier, using rule-based fallback"
        );
        return analyze_patient(symptoms, vitals);
    };

    let mut reasoning: Vec<String> = prediction
        .top_features
        .iter()
        .map(|f| {
            format!(
                "{}: {} ({:.2})",
                f.name.replace('_', " "),
                f.direction,
                f.impact.abs()
            )
        })
        .collect();

    // Provenance tag: callers exposing reasoning to users must keep it.
    reasoning.push(if prediction.mock {
        "ML Model (Mock Mode)".into()
    } else {
        "XGBoost ML Model".into()
    });

    ScreeningResult {
        risk_level,
        department: department_for_symptoms(symptoms),
        reasoning,
    }
}

/// Department routing from symptom keywords; the model does not predict it.
fn department_for_symptoms(symptoms: &str) -> Department {
    let lower = symptoms.to_lowercase();
    if lower.contains("chest") || lower.contains("heart") {
        Department::Cardiology
    } else if lower.contains("stroke") || lower.contains("headache") {
        Department::Neurology
    } else if lower.contains("fracture") || lower.contains("bone") {
        Department::Orthopedics
    } else if lower.contains("breath") {
        Department::Pulmonology
    } else {
        Department::GeneralMedicine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(risk: &str, mock: bool) -> MlPrediction {
        MlPrediction {
            risk_level: risk.into(),
            top_features: vec![
                TopFeature {
                    name: "heart_rate".into(),
                    direction: "increases".into(),
                    impact: -0.42,
                },
                TopFeature {
                    name: "temperature".into(),
                    direction: "decreases".into(),
                    impact: 0.1,
                },
            ],
            mock,
        }
    }

    #[test]
    fn http_scorer_trims_trailing_slash() {
        let scorer = HttpMlScorer::new("http://localhost:5001/", 3);
        assert_eq!(scorer.base_url, "http://localhost:5001");
        assert_eq!(scorer.timeout_secs, 3);
    }

    #[test]
    fn features_take_reference_defaults() {
        let f = MlFeatures::from_screening(None, &ScreeningVitals::default());
        assert_eq!(f.age, 35);
        assert_eq!(f.heart_rate, 75);
        assert_eq!(f.blood_pressure_systolic, 120);
        assert_eq!(f.blood_pressure_diastolic, 80);
        assert_eq!(f.temperature, 37.0);
        assert_eq!(f.oxygen_saturation, 98);
    }

    #[test]
    fn features_use_supplied_vitals() {
        let vitals = ScreeningVitals {
            heart_rate: Some(140),
            systolic_bp: Some(180),
            ..Default::default()
        };
        let f = MlFeatures::from_screening(Some(70), &vitals);
        assert_eq!(f.age, 70);
        assert_eq!(f.heart_rate, 140);
        assert_eq!(f.blood_pressure_systolic, 180);
    }

    #[test]
    fn successful_prediction_maps_reasoning_and_provenance() {
        let scorer = MockMlScorer::new(prediction("high", false));
        let r = assess_with_fallback(&scorer, "chest pain", None, &ScreeningVitals::default());
        assert_eq!(r.risk_level, RiskTier::High);
        assert_eq!(r.department, Department::Cardiology);
        assert!(r.reasoning.contains(&"heart rate: increases (0.42)".to_string()));
        assert_eq!(r.reasoning.last().unwrap(), "XGBoost ML Model");
    }

    #[test]
    fn mock_model_provenance_is_tagged() {
        let scorer = MockMlScorer::new(prediction("medium", true));
        let r = assess_with_fallback(&scorer, "", None, &ScreeningVitals::default());
        assert_eq!(r.risk_level, RiskTier::Moderate);
        assert_eq!(r.reasoning.last().unwrap(), "ML Model (Mock Mode)");
    }

    #[test]
    fn failure_falls_back_to_screening_rules() {
        let scorer = MockMlScorer::failing();
        let vitals = ScreeningVitals {
            heart_rate: Some(150),
            ..Default::default()
        };
        let r = assess_with_fallback(&scorer, "chest pain", None, &vitals);
        // Local screening result: critical HR + high-risk keyword.
        assert_eq!(r.risk_level, RiskTier::High);
        assert_eq!(r.department, Department::Cardiology);
        assert!(r.reasoning.iter().any(|x| x.contains("Critical Heart Rate")));
        assert!(!r.reasoning.iter().any(|x| x.contains("ML Model")));
    }

    #[test]
    fn unknown_tier_falls_back() {
        let scorer = MockMlScorer::new(MlPrediction {
            risk_level: "banana".into(),
            top_features: vec![],
            mock: false,
        });
        let r = assess_with_fallback(&scorer, "headache", None, &ScreeningVitals::default());
        // Screening path: "headache" is a medium keyword.
        assert_eq!(r.risk_level, RiskTier::Moderate);
        assert_eq!(r.department, Department::Neurology);
    }

    #[test]
    fn department_keyword_precedence() {
        assert_eq!(department_for_symptoms("chest pain"), Department::Cardiology);
        assert_eq!(
            department_for_symptoms("terrible headache"),
            Department::Neurology
        );
        assert_eq!(department_for_symptoms("broken bone"), Department::Orthopedics);
        assert_eq!(
            department_for_symptoms("short of breath"),
            Department::Pulmonology
        );
        assert_eq!(department_for_symptoms(""), Department::GeneralMedicine);
        // Cardiology wins when both appear; the checks are ordered.
        assert_eq!(
            department_for_symptoms("chest pain and headache"),
            Department::Cardiology
        );
    }

    #[test]
    fn provenance_keeps_reasoning_non_empty() {
        let scorer = MockMlScorer::new(MlPrediction {
            risk_level: "low".into(),
            top_features: vec![],
            mock: true,
        });
        let r = assess_with_fallback(&scorer, "", None, &ScreeningVitals::default());
        assert_eq!(r.reasoning, vec!["ML Model (Mock Mode)"]);
    }
}
