//! LeetCode profile score.
//!
//! Four weighted terms plus a one-shot volume bonus for accounts with at
//! least 100 solved problems. The bonus branches are checked in order and
//! only the first matching one is applied.

use super::finalize_score;

const RANKING_CEILING: f64 = 200_000.0;
const VOLUME_BONUS_MIN_SOLVED: u32 = 100;

/// Raw LeetCode counters. `None` / zero means "not reported".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeetcodeScoreInput {
    pub total_solved: u32,
    pub total_questions: u32,
    pub easy_solved: u32,
    pub total_easy: u32,
    pub medium_solved: u32,
    pub total_medium: u32,
    pub hard_solved: u32,
    pub total_hard: u32,
    /// Percentage, 0 – 100.
    pub acceptance_rate: Option<f64>,
    pub ranking: Option<u32>,
}

pub fn compute_leetcode_score(input: &LeetcodeScoreInput) -> u32 {
    let mut score = completion_term(input)
        + difficulty_term(input)
        + acceptance_term(input)
        + ranking_term(input);

    score += volume_bonus(input.total_solved, score);

    finalize_score(score)
}

/// (solved / questions) × 100; 0 when the question total is unknown.
fn completion_term(input: &LeetcodeScoreInput) -> f64 {
    if input.total_questions == 0 {
        return 0.0;
    }
    input.total_solved as f64 / input.total_questions as f64 * 100.0
}

/// Difficulty-weighted solved ratio × 10 (hard ×3, medium ×2, easy ×1).
/// Each weighted total is floored at 1 so an unreported bucket never divides by zero.
fn difficulty_term(input: &LeetcodeScoreInput) -> f64 {
    let solved = input.hard_solved as f64 * 3.0
        + input.medium_solved as f64 * 2.0
        + input.easy_solved as f64;

    let total = floor_at_one(input.total_hard as f64 * 3.0)
        + floor_at_one(input.total_medium as f64 * 2.0)
        + floor_at_one(input.total_easy as f64);

    solved / total * 10.0
}

fn acceptance_term(input: &LeetcodeScoreInput) -> f64 {
    match input.acceptance_rate {
        Some(rate) if rate > 0.0 => rate / 100.0 * 5.0,
        _ => 0.0,
    }
}

/// Linear in rank: rank 1 ≈ 5 points, rank ≥ 200 000 → 0. Unranked → 0.
fn ranking_term(input: &LeetcodeScoreInput) -> f64 {
    match input.ranking {
        Some(rank) if rank > 0 => ((RANKING_CEILING - rank as f64) / RANKING_CEILING).max(0.0) * 5.0,
        _ => 0.0,
    }
}

/// Bonus for high-volume solvers, evaluated against the running score.
/// First matching branch wins; at most one bonus is ever applied.
pub fn volume_bonus(total_solved: u32, running_score: f64) -> f64 {
    if total_solved < VOLUME_BONUS_MIN_SOLVED {
        return 0.0;
    }
    if running_score < 40.0 {
        50.0
    } else if running_score < 50.0 {
        45.0
    } else if running_score < 60.0 {
        40.0
    } else {
        0.0
    }
}

fn floor_at_one(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        1.0
    }
}
