//! Composite quality score for comparing reconstruction candidates.

use crate::script;

/// Score a reconstructed block of text.
///
/// Mean confidence dominates (typical range 0–100); length (capped at 500
/// characters) and dense-script ratio act as tie-breakers that favor longer,
/// more linguistically plausible reconstructions when confidences are close.
pub fn score(text: &str, mean_confidence: f32) -> f32 {
    let len = text.trim().chars().count();
    mean_confidence + (len as f32 / 500.0).min(1.0) + script::dense_ratio(text) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strictly_increasing_in_confidence() {
        let text = "同じ本文";
        assert!(score(text, 80.0) > score(text, 79.9));
        assert!(score(text, 0.1) > score(text, 0.0));
    }

    #[test]
    fn test_non_decreasing_in_length() {
        let short = "あ".repeat(10);
        let long = "あ".repeat(400);
        assert!(score(&long, 70.0) > score(&short, 70.0));
    }

    #[test]
    fn test_length_bonus_caps_at_500() {
        let at_cap = "a".repeat(500);
        let past_cap = "a".repeat(900);
        assert_eq!(score(&at_cap, 70.0), score(&past_cap, 70.0));
    }

    #[test]
    fn test_dense_script_bonus() {
        // Same length and confidence; the dense-script text wins.
        assert!(score("今日は晴れ", 70.0) > score("abcde", 70.0));
    }

    #[test]
    fn test_confidence_dominates_tiebreakers() {
        // Length and density together add at most 1.5.
        let long_dense = "字".repeat(600);
        assert!(score("a", 72.0) > score(&long_dense, 70.0));
    }
}
