use std::collections::HashSet;

use super::lexicon::{Lexicon, SymptomEntry};

/// Scan free text for known symptoms by lowercase substring containment
/// against each canonical name and its synonyms.
///
/// Returns deduped canonical names in lexicon enumeration order. Pure
/// substring matching: no tokenization, no stemming, no word boundaries.
/// False positives on substrings inside unrelated words are an accepted
/// precision trade-off of this heuristic.
pub fn extract_symptoms(lexicon: &Lexicon, text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return vec![];
    }

    let lower = text.to_lowercase();
    let mut found = Vec::new();
    let mut seen = HashSet::new();

    for entry in &lexicon.symptoms {
        if seen.contains(&entry.name) {
            continue;
        }
        let name_hit = lower.contains(&entry.name.to_lowercase());
        let synonym_hit = || {
            entry
                .synonyms
                .iter()
                .any(|syn| lower.contains(&syn.to_lowercase()))
        };
        if name_hit || synonym_hit() {
            seen.insert(entry.name.clone());
            found.push(entry.name.clone());
        }
    }

    found
}

/// Incremental-typing autocomplete over the symptom dictionary.
///
/// Bidirectional substring check (entry contains query, or query contains
/// entry): name matches rank before synonym matches, each entry appears at
/// most once, and the result is truncated to `limit`.
pub fn search_symptoms<'a>(
    lexicon: &'a Lexicon,
    query: &str,
    limit: usize,
) -> Vec<&'a SymptomEntry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return vec![];
    }

    let mut results: Vec<&SymptomEntry> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    let contains_either = |candidate: &str| {
        let lower = candidate.to_lowercase();
        lower.contains(&query) || query.contains(&lower)
    };

    for entry in &lexicon.symptoms {
        if seen.contains(entry.name.as_str()) {
            continue;
        }
        if contains_either(&entry.name) {
            seen.insert(&entry.name);
            results.push(entry);
        }
    }

    for entry in &lexicon.symptoms {
        if seen.contains(entry.name.as_str()) {
            continue;
        }
        if entry.synonyms.iter().any(|syn| contains_either(syn)) {
            seen.insert(&entry.name);
            results.push(entry);
        }
    }

    results.truncate(limit);
    results
}
