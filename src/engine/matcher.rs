use super::lexicon::Lexicon;
use super::types::ConditionMatch;

/// Similarity below or at this value is treated as no match.
const SIMILARITY_FLOOR: f64 = 0.6;
/// A condition enters the ranking only above this score.
const INCLUSION_THRESHOLD: f64 = 0.2;

/// Standard single-character insert/delete/substitute edit distance,
/// computed over the full dynamic-programming matrix on Unicode scalars.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut matrix = vec![vec![0usize; a.len() + 1]; b.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=a.len() {
        matrix[0][j] = j;
    }

    for i in 1..=b.len() {
        for j in 1..=a.len() {
            if b[i - 1] == a[j - 1] {
                matrix[i][j] = matrix[i - 1][j - 1];
            } else {
                matrix[i][j] = 1 + matrix[i - 1][j - 1]
                    .min(matrix[i][j - 1])
                    .min(matrix[i - 1][j]);
            }
        }
    }

    matrix[b.len()][a.len()]
}

/// Tiered similarity between a user-reported symptom and a condition's
/// required symptom, both already lowercased:
/// exact equality 1.0; substring either direction 0.8; otherwise normalized
/// edit-distance similarity, accepted only above the 0.6 floor.
fn similarity(user: &str, required: &str) -> f64 {
    if user == required {
        return 1.0;
    }
    if required.contains(user) || user.contains(required) {
        return 0.8;
    }
    let max_len = user.chars().count().max(required.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    let dist = levenshtein_distance(user, required);
    let sim = 1.0 - dist as f64 / max_len as f64;
    if sim > SIMILARITY_FLOOR {
        sim
    } else {
        0.0
    }
}

/// Score every lexicon condition against the reported symptom set.
///
/// Per condition: each required symptom takes its best similarity across all
/// user symptoms; score = sum of best values / number of required symptoms,
/// clamped to 1.0. Included only when score > 0.2 with at least one matched
/// symptom. Sorted descending by score; the sort is stable, so ties keep
/// lexicon enumeration order.
pub fn match_conditions<'a>(lexicon: &'a Lexicon, symptoms: &[String]) -> Vec<ConditionMatch<'a>> {
    if symptoms.is_empty() {
        return vec![];
    }

    let user_lower: Vec<String> = symptoms.iter().map(|s| s.to_lowercase()).collect();
    let mut matches = Vec::new();

    for condition in &lexicon.conditions {
        let mut total = 0.0;
        let mut matched = Vec::new();

        for required in &condition.symptoms {
            let required_lower = required.to_lowercase();
            let best = user_lower
                .iter()
                .map(|user| similarity(user, &required_lower))
                .fold(0.0f64, f64::max);
            if best > 0.0 {
                matched.push(required.clone());
                total += best;
            }
        }

        if condition.symptoms.is_empty() {
            continue;
        }
        let score = total / condition.symptoms.len() as f64;
        if score > INCLUSION_THRESHOLD && !matched.is_empty() {
            matches.push(ConditionMatch {
                condition,
                match_score: score.min(1.0),
                matched_symptoms: matched,
            });
        }
    }

    matches.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    matches
}
