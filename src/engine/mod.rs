//! The risk assessment engine: deterministic, synchronous, and stateless per
//! call. Both scoring paths read one immutable lexicon injected at
//! construction; concurrent calls need no coordination.

pub mod classify;
pub mod extract;
pub mod lexicon;
pub mod matcher;
pub mod messages;
pub mod screening;
pub mod types;
pub mod vitals;

use std::time::Instant;

pub use lexicon::{ConditionEntry, Lexicon, LexiconError, SymptomEntry};
pub use types::{
    ConditionMatch, Department, Gender, Guidance, PatientContext, RankedCondition, RiskTier,
    TextAssessment, ValidationError, Vitals, VitalsAssessment,
};

/// Entry point over both scoring paths.
///
/// Holds the shared read-only lexicon; every method is a pure function of
/// its arguments and that lexicon.
pub struct TriageEngine {
    lexicon: Lexicon,
}

impl TriageEngine {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Engine over the bundled dictionaries.
    pub fn builtin() -> Self {
        Self::new(Lexicon::builtin())
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Structured-vitals path: additive rule scoring, department routing,
    /// triggered-rule explanations.
    pub fn assess_vitals(&self, vitals: &Vitals) -> VitalsAssessment {
        let start = Instant::now();
        let result = vitals::assess_vitals(vitals);
        tracing::info!(
            risk = result.risk_level.vitals_label(),
            department = %result.recommended_department,
            confidence = result.confidence_score,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Vitals assessment complete"
        );
        result
    }

    /// Free-text path: extraction, fuzzy condition matching, tiering.
    pub fn classify_text(&self, text: &str) -> TextAssessment {
        let start = Instant::now();
        let result = classify::classify(&self.lexicon, text);
        tracing::info!(
            risk = result.risk.text_label(),
            conditions = result.diseases.len(),
            confidence = result.confidence,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Text assessment complete"
        );
        result
    }

    /// Deduped canonical symptom names found in free text.
    pub fn extract_symptoms(&self, text: &str) -> Vec<String> {
        extract::extract_symptoms(&self.lexicon, text)
    }

    /// Autocomplete over the symptom dictionary, capped at `limit`.
    pub fn search_symptoms(&self, query: &str, limit: usize) -> Vec<&SymptomEntry> {
        extract::search_symptoms(&self.lexicon, query, limit)
    }

    /// Ranked condition matches for an already-extracted symptom set.
    pub fn match_conditions(&self, symptoms: &[String]) -> Vec<ConditionMatch<'_>> {
        matcher::match_conditions(&self.lexicon, symptoms)
    }
}
