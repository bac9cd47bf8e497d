//! Narrative report templates for assessment results.

use super::types::{Department, RiskTier};

/// Tier-keyed preamble for the narrative summary.
fn preamble(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::High => {
            "CRITICAL ALERT: Analyzing the patient's vitals and reported symptoms, \
             we have detected immediate risk factors that require urgent attention."
        }
        RiskTier::Moderate => {
            "CAUTION: The patient exhibits potentially concerning symptoms that \
             warrant medical evaluation."
        }
        RiskTier::Low => {
            "MONITOR: While no critical signs are present, the reported symptoms \
             suggest a need for routine consultation."
        }
    }
}

/// Render a human-readable triage summary from a tier, a department, and the
/// triggered-rule reasons.
///
/// With no reasons at all, a generic check-up recommendation is returned
/// instead of an empty report.
pub fn narrative_summary(tier: RiskTier, department: Department, reasons: &[String]) -> String {
    if reasons.is_empty() {
        return "Based on the provided information, no immediate high-risk factors \
                were identified. A general check-up is recommended."
            .to_string();
    }

    let findings = reasons
        .iter()
        .map(|r| format!("- {r}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n\nRecommended Department: {department}\n\nKey Findings:\n{findings}\n\n\
         Please proceed to the {department} department for further assessment.",
        preamble(tier),
    )
}
