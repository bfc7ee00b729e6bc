//! Candidate scoring
//!
//! Scores only rank candidates against each other; the values have no
//! absolute meaning.

/// Score of an empty candidate, below anything a non-empty text can reach
pub const EMPTY_SCORE: f64 = -1e9;

/// Length beyond which longer text earns no extra credit
const LENGTH_CAP: usize = 12;
const LENGTH_WEIGHT: f64 = 10.0;
const EXACT_LENGTH_BONUS: f64 = 500.0;
const LENGTH_MISMATCH_PENALTY: f64 = 120.0;
const CONFIDENCE_WEIGHT: f64 = 100.0;

/// Score a filtered candidate text.
///
/// `confidence` counts as 0 when absent. `expected_length` biases strongly
/// toward candidates of exactly that many characters.
pub fn score_candidate(text: &str, confidence: Option<f32>, expected_length: Option<usize>) -> f64 {
    if text.is_empty() {
        return EMPTY_SCORE;
    }

    let len = text.chars().count();
    let mut score = len.min(LENGTH_CAP) as f64 * LENGTH_WEIGHT;

    if let Some(expected) = expected_length {
        if len == expected {
            score += EXACT_LENGTH_BONUS;
        } else {
            score -= len.abs_diff(expected) as f64 * LENGTH_MISMATCH_PENALTY;
        }
    }

    score + f64::from(confidence.unwrap_or(0.0)) * CONFIDENCE_WEIGHT
}
