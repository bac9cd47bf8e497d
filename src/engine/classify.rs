use chrono::Local;
use uuid::Uuid;

use super::extract::extract_symptoms;
use super::lexicon::Lexicon;
use super::matcher::match_conditions;
use super::types::{Guidance, RankedCondition, RiskTier, TextAssessment};

/// Ranked output is bounded to the strongest five conditions.
const TOP_N: usize = 5;

/// Placeholder row when nothing in the lexicon matched.
const NO_MATCH_LABEL: &str = "Unclear - no strong local match";

/// Highest intrinsic tier among the extracted symptoms that exist in the
/// lexicon. Unknown symptoms are ignored for tiering (they still feed the
/// matcher). Empty input is Low.
pub fn determine_risk_level(lexicon: &Lexicon, symptoms: &[String]) -> RiskTier {
    symptoms
        .iter()
        .filter_map(|s| lexicon.find_symptom(s))
        .map(|entry| entry.risk_level)
        .max()
        .unwrap_or(RiskTier::Low)
}

/// Free-text classification path: extract symptoms, tier them, rank
/// conditions, assemble guidance and confidence.
///
/// Total for any input: empty or unrecognized text yields a Low-tier result
/// with the placeholder condition and generic guidance, never an error.
pub fn classify(lexicon: &Lexicon, text: &str) -> TextAssessment {
    let extracted = extract_symptoms(lexicon, text);
    let risk = determine_risk_level(lexicon, &extracted);
    let matches = match_conditions(lexicon, &extracted);

    let mut diseases: Vec<RankedCondition> = matches
        .iter()
        .take(TOP_N)
        .map(|m| RankedCondition {
            name: m.condition.name.clone(),
            likelihood: likelihood_label(m.match_score).into(),
            score: Some((m.match_score * 100.0).round() as u32),
        })
        .collect();

    let guidance = matches
        .first()
        .map(|m| Guidance {
            dos: m.condition.dos.clone(),
            donts: m.condition.donts.clone(),
            remedies: m.condition.remedies.clone(),
        })
        .unwrap_or_else(Guidance::generic);

    let top_score = matches.first().map(|m| m.match_score).unwrap_or(0.0);
    let confidence = confidence_for(top_score, risk);

    if diseases.is_empty() {
        diseases.push(RankedCondition {
            name: NO_MATCH_LABEL.into(),
            likelihood: "Low".into(),
            score: None,
        });
    }

    tracing::debug!(
        symptoms = extracted.len(),
        matches = matches.len(),
        risk = risk.text_label(),
        confidence,
        "Text classification complete"
    );

    TextAssessment {
        id: Uuid::new_v4(),
        risk,
        diseases,
        guidance,
        confidence,
        assessed_at: Local::now().naive_local(),
    }
}

fn likelihood_label(score: f64) -> &'static str {
    if score >= 0.7 {
        "High"
    } else if score >= 0.4 {
        "Moderate"
    } else {
        "Low"
    }
}

/// `min(99, 50 + min(30, round(top*30)) - 10·[tier is High])`.
fn confidence_for(top_score: f64, risk: RiskTier) -> u32 {
    let boost = ((top_score * 30.0).round() as i64).min(30);
    let penalty = if risk == RiskTier::High { 10 } else { 0 };
    (50 + boost - penalty).min(99).max(0) as u32
}
