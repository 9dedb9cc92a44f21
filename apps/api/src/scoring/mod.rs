// Profile score calculators.
// Each provider has its own weighted-factor formula; all scores land in [0, 100].

pub mod github;
pub mod leetcode;

pub const MAX_SCORE: u32 = 100;

/// Clamps a raw weighted sum to [0, 100] and rounds to the nearest integer.
pub(crate) fn finalize_score(raw: f64) -> u32 {
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, MAX_SCORE as f64).round() as u32
}

/// Human-readable band for a 0 – 100 score.
pub fn score_label(score: u32) -> &'static str {
    match score {
        80.. => "Excellent",
        60..=79 => "Good",
        40..=59 => "Average",
        _ => "Needs Improvement",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_clamps_and_rounds() {
        assert_eq!(finalize_score(-3.0), 0);
        assert_eq!(finalize_score(42.5), 43);
        assert_eq!(finalize_score(42.49), 42);
        assert_eq!(finalize_score(180.0), 100);
        assert_eq!(finalize_score(f64::NAN), 0);
    }

    #[test]
    fn test_score_label_bands() {
        assert_eq!(score_label(100), "Excellent");
        assert_eq!(score_label(80), "Excellent");
        assert_eq!(score_label(79), "Good");
        assert_eq!(score_label(60), "Good");
        assert_eq!(score_label(40), "Average");
        assert_eq!(score_label(39), "Needs Improvement");
        assert_eq!(score_label(0), "Needs Improvement");
    }
}
