use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{de_tier, ser_text_tier, RiskTier};

/// A known symptom: canonical name, surface-form synonyms, intrinsic tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomEntry {
    pub name: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(
        rename = "riskLevel",
        serialize_with = "ser_text_tier",
        deserialize_with = "de_tier"
    )]
    pub risk_level: RiskTier,
}

/// A known low/medium-acuity condition with its required symptom set and
/// guidance block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionEntry {
    pub name: String,
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub dos: Vec<String>,
    #[serde(default)]
    pub donts: Vec<String>,
    #[serde(default)]
    pub remedies: Vec<String>,
}

/// Errors loading the lexicon from disk. An empty lexicon is not an error;
/// scoring degrades to "no matches".
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("Failed to read lexicon file {0}: {1}")]
    Load(String, String),
    #[error("Failed to parse {0}: {1}")]
    Parse(String, String),
}

/// The static symptom/condition reference tables. Constructed once at
/// process start, injected into the engine, and never mutated — every
/// concurrent assessment call reads it without coordination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    pub symptoms: Vec<SymptomEntry>,
    pub conditions: Vec<ConditionEntry>,
}

impl Lexicon {
    /// Load the lexicon from `symptoms.json` and `conditions.json` in the
    /// given directory.
    pub fn load(dir: &std::path::Path) -> Result<Self, LexiconError> {
        let symptoms_path = dir.join("symptoms.json");
        let conditions_path = dir.join("conditions.json");

        let symptoms_json = std::fs::read_to_string(&symptoms_path).map_err(|e| {
            LexiconError::Load(symptoms_path.display().to_string(), e.to_string())
        })?;
        let symptoms: Vec<SymptomEntry> = serde_json::from_str(&symptoms_json)
            .map_err(|e| LexiconError::Parse("symptoms.json".into(), e.to_string()))?;

        let conditions_json = std::fs::read_to_string(&conditions_path).map_err(|e| {
            LexiconError::Load(conditions_path.display().to_string(), e.to_string())
        })?;
        let conditions: Vec<ConditionEntry> = serde_json::from_str(&conditions_json)
            .map_err(|e| LexiconError::Parse("conditions.json".into(), e.to_string()))?;

        tracing::info!(
            symptoms = symptoms.len(),
            conditions = conditions.len(),
            "Lexicon loaded from {}",
            dir.display()
        );

        Ok(Self {
            symptoms,
            conditions,
        })
    }

    /// Look up a symptom entry by canonical name, case-insensitively.
    pub fn find_symptom(&self, name: &str) -> Option<&SymptomEntry> {
        let lower = name.to_lowercase();
        self.symptoms
            .iter()
            .find(|s| s.name.to_lowercase() == lower)
    }

    /// The bundled dictionaries: symptoms with synonyms and intrinsic tiers,
    /// and the low/medium-acuity conditions the fuzzy matcher ranks.
    pub fn builtin() -> Self {
        Self {
            symptoms: vec![
                // High-acuity symptoms
                symptom("Chest pain", &["chest tightness", "chest pressure"], RiskTier::High),
                symptom(
                    "Shortness of breath",
                    &["breathlessness", "difficulty breathing", "short of breath"],
                    RiskTier::High,
                ),
                symptom("Numbness", &["tingling", "loss of sensation"], RiskTier::High),
                symptom(
                    "Slurred speech",
                    &["speech difficulty", "trouble speaking"],
                    RiskTier::High,
                ),
                symptom(
                    "Severe bleeding",
                    &["heavy bleeding", "uncontrolled bleeding"],
                    RiskTier::High,
                ),
                symptom(
                    "Fainting",
                    &["passed out", "loss of consciousness", "blackout"],
                    RiskTier::High,
                ),
                // Moderate-acuity symptoms
                symptom("Fever", &["high temperature", "febrile", "pyrexia"], RiskTier::Moderate),
                symptom("Vomiting", &["throwing up", "emesis"], RiskTier::Moderate),
                symptom(
                    "Dizziness",
                    &["lightheaded", "light-headed", "vertigo"],
                    RiskTier::Moderate,
                ),
                symptom(
                    "Abdominal pain",
                    &["stomach ache", "stomach pain", "belly pain"],
                    RiskTier::Moderate,
                ),
                symptom("Palpitations", &["racing heart", "heart pounding"], RiskTier::Moderate),
                symptom("Wheezing", &["whistling breath"], RiskTier::Moderate),
                symptom("Rash", &["skin eruption", "hives"], RiskTier::Moderate),
                symptom("Diarrhea", &["loose stools", "loose motion"], RiskTier::Moderate),
                symptom(
                    "Painful urination",
                    &["burning urination", "dysuria"],
                    RiskTier::Moderate,
                ),
                symptom(
                    "Blurred vision",
                    &["vision problems", "double vision"],
                    RiskTier::Moderate,
                ),
                symptom("Joint pain", &["arthralgia", "aching joints"], RiskTier::Moderate),
                // Low-acuity symptoms
                symptom("Headache", &["head pain", "head ache", "migraine"], RiskTier::Low),
                symptom("Nausea", &["queasy", "feeling sick"], RiskTier::Low),
                symptom("Cough", &["dry cough", "persistent cough"], RiskTier::Low),
                symptom("Sore throat", &["throat pain", "scratchy throat"], RiskTier::Low),
                symptom("Runny nose", &["nasal congestion", "stuffy nose"], RiskTier::Low),
                symptom("Sneezing", &["sneezes"], RiskTier::Low),
                symptom("Fatigue", &["tiredness", "exhaustion", "worn out"], RiskTier::Low),
                symptom("Chills", &["shivering"], RiskTier::Low),
                symptom(
                    "Muscle ache",
                    &["body ache", "myalgia", "muscle pain"],
                    RiskTier::Low,
                ),
                symptom("Heartburn", &["acid reflux", "indigestion"], RiskTier::Low),
                symptom("Itching", &["itchy skin"], RiskTier::Low),
                symptom("Watery eyes", &["itchy eyes", "eye watering"], RiskTier::Low),
                symptom("Loss of appetite", &["poor appetite"], RiskTier::Low),
            ],
            conditions: vec![
                condition(
                    "Common Cold",
                    &["Runny nose", "Sneezing", "Sore throat", "Cough", "Headache"],
                    &["Rest well", "Drink warm fluids", "Use saline nasal drops"],
                    &["Avoid cold drinks", "Avoid unnecessary antibiotics"],
                    &["Honey and ginger tea", "Steam inhalation"],
                ),
                condition(
                    "Influenza",
                    &["Fever", "Muscle ache", "Fatigue", "Cough", "Headache", "Chills"],
                    &["Rest in bed", "Drink plenty of fluids", "Monitor your temperature"],
                    &["Avoid close contact with others", "Avoid strenuous activity"],
                    &["Warm broth", "Paracetamol for fever as directed on the label"],
                ),
                condition(
                    "Migraine",
                    &["Headache", "Nausea", "Blurred vision"],
                    &["Rest in a dark, quiet room", "Apply a cold compress", "Stay hydrated"],
                    &["Avoid bright screens", "Avoid skipping meals"],
                    &["Caffeine in moderation", "Regular sleep schedule"],
                ),
                condition(
                    "Tension Headache",
                    &["Headache", "Fatigue", "Muscle ache"],
                    &["Take short breaks from screens", "Gently stretch neck and shoulders"],
                    &["Avoid prolonged poor posture", "Avoid excessive caffeine"],
                    &["Warm shower", "Relaxation breathing"],
                ),
                condition(
                    "Gastroenteritis",
                    &["Nausea", "Vomiting", "Diarrhea", "Abdominal pain", "Fever"],
                    &["Sip oral rehydration solution", "Eat bland food when able"],
                    &["Avoid dairy until recovered", "Avoid anti-diarrheal drugs without advice"],
                    &["Rice water", "Banana and toast diet"],
                ),
                condition(
                    "Food Poisoning",
                    &["Nausea", "Vomiting", "Diarrhea", "Abdominal pain"],
                    &["Rehydrate frequently in small sips", "Rest your stomach"],
                    &["Avoid solid food for a few hours", "Avoid caffeine and alcohol"],
                    &["Ginger tea", "Clear fluids"],
                ),
                condition(
                    "Seasonal Allergies",
                    &["Sneezing", "Runny nose", "Itching", "Watery eyes"],
                    &["Keep windows closed on high-pollen days", "Rinse nasal passages"],
                    &["Avoid outdoor activity at dawn", "Avoid rubbing your eyes"],
                    &["Saline nasal rinse", "Cold compress on eyes"],
                ),
                condition(
                    "Acid Reflux",
                    &["Heartburn", "Sore throat", "Cough", "Nausea"],
                    &["Eat smaller meals", "Stay upright after eating"],
                    &["Avoid spicy and fatty food", "Avoid eating late at night"],
                    &["Chew sugar-free gum after meals", "Sleep with head elevated"],
                ),
                condition(
                    "Sinusitis",
                    &["Headache", "Runny nose", "Sore throat", "Fever"],
                    &["Use steam inhalation", "Apply warm compresses to the face"],
                    &["Avoid dry indoor air", "Avoid smoking"],
                    &["Saline nasal spray", "Warm fluids"],
                ),
                condition(
                    "Bronchitis",
                    &["Cough", "Wheezing", "Fatigue", "Fever"],
                    &["Rest and drink warm fluids", "Use a humidifier"],
                    &["Avoid smoke and dust", "Avoid cough suppressants for a productive cough"],
                    &["Honey in warm water", "Steam inhalation"],
                ),
                condition(
                    "Strep Throat",
                    &["Sore throat", "Fever", "Headache"],
                    &["Gargle with warm salt water", "Rest your voice"],
                    &["Avoid sharing utensils", "Avoid acidic drinks"],
                    &["Warm herbal tea with honey", "Throat lozenges"],
                ),
                condition(
                    "Urinary Tract Infection",
                    &["Painful urination", "Abdominal pain", "Fever"],
                    &["Drink plenty of water", "Empty your bladder fully"],
                    &["Avoid holding urine", "Avoid caffeine and alcohol"],
                    &["Cranberry juice", "Warm compress on lower abdomen"],
                ),
                condition(
                    "Dehydration",
                    &["Dizziness", "Fatigue", "Headache", "Loss of appetite"],
                    &["Sip fluids steadily", "Rest in a cool place"],
                    &["Avoid exertion in heat", "Avoid sugary drinks"],
                    &["Oral rehydration solution", "Fruit with high water content"],
                ),
            ],
        }
    }

    /// Small fixture for tests (no file I/O).
    pub fn load_test() -> Self {
        Self {
            symptoms: vec![
                symptom("Chest pain", &["chest tightness"], RiskTier::High),
                symptom("Fever", &["high temperature"], RiskTier::Moderate),
                symptom("Headache", &["head pain"], RiskTier::Low),
                symptom("Nausea", &["queasy"], RiskTier::Low),
                symptom("Cough", &["dry cough"], RiskTier::Low),
            ],
            conditions: vec![
                condition(
                    "Migraine",
                    &["Headache", "Nausea"],
                    &["Rest in a dark room"],
                    &["Avoid bright screens"],
                    &["Cold compress"],
                ),
                condition(
                    "Common Cold",
                    &["Cough", "Headache", "Fever"],
                    &["Rest well"],
                    &["Avoid cold drinks"],
                    &["Honey and ginger tea"],
                ),
            ],
        }
    }
}

fn symptom(name: &str, synonyms: &[&str], risk_level: RiskTier) -> SymptomEntry {
    SymptomEntry {
        name: name.into(),
        synonyms: synonyms.iter().map(|s| (*s).into()).collect(),
        risk_level,
    }
}

fn condition(
    name: &str,
    symptoms: &[&str],
    dos: &[&str],
    donts: &[&str],
    remedies: &[&str],
) -> ConditionEntry {
    ConditionEntry {
        name: name.into(),
        symptoms: symptoms.iter().map(|s| (*s).into()).collect(),
        dos: dos.iter().map(|s| (*s).into()).collect(),
        donts: donts.iter().map(|s| (*s).into()).collect(),
        remedies: remedies.iter().map(|s| (*s).into()).collect(),
    }
}
