//! Deterministic heuristic payloads used when an AI response cannot be validated.
//! Every string here is derived from structured profile data only.

use crate::analysis::models::{GithubAnalysis, LeetcodeAnalysis};
use crate::providers::github::GithubAggregate;
use crate::providers::leetcode::LeetcodeStats;

/// Beginner-friendly problems suggested whenever the AI list is unavailable.
pub const BEGINNER_PROBLEMS: &[&str] = &[
    "Two Sum",
    "Valid Parentheses",
    "Merge Two Sorted Lists",
    "Binary Tree Inorder Traversal",
    "Maximum Subarray",
    "Climbing Stairs",
];

const GITHUB_RECOMMENDATIONS: &[&str] = &[
    "Pin your best repositories and give each a clear README",
    "Add topics and descriptions so projects are discoverable",
    "Contribute to an open-source project in your main language",
];

pub fn leetcode_fallback(stats: &LeetcodeStats) -> LeetcodeAnalysis {
    // An unreported acceptance rate satisfies neither the strength nor the weakness check.
    let acceptance = stats.acceptance_rate;

    let strengths = vec![
        if stats.total_solved >= 100 {
            "Consistent problem solver with good volume"
        } else {
            "Getting started with problem solving"
        },
        if acceptance.is_some_and(|r| r >= 50.0) {
            "Good problem-solving accuracy"
        } else {
            "Working on problem-solving approach"
        },
        if stats.medium_solved > stats.easy_solved {
            "Comfortable with medium difficulty"
        } else {
            "Building foundation with easier problems"
        },
    ];

    let weaknesses = [
        (stats.hard_solved < 10, "Limited experience with hard problems"),
        (
            acceptance.is_some_and(|r| r < 60.0),
            "Can improve solution efficiency",
        ),
        (
            stats.total_solved < 200,
            "Could benefit from more practice volume",
        ),
    ]
    .into_iter()
    .filter(|(applies, _)| *applies)
    .map(|(_, text)| text);

    LeetcodeAnalysis {
        strengths: strengths.into_iter().map(String::from).collect(),
        weaknesses: weaknesses.map(String::from).collect(),
        next_recommended_questions: BEGINNER_PROBLEMS.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn github_fallback(aggregate: &GithubAggregate) -> GithubAnalysis {
    let profile = &aggregate.profile;
    let user = &aggregate.user;
    let has_bio = user.bio.as_deref().is_some_and(|b| !b.is_empty());

    let strengths = vec![
        if profile.public_repos >= 20 {
            "Large portfolio of public repositories"
        } else {
            "Building up a public portfolio"
        },
        if profile.followers >= 100 {
            "Strong community following"
        } else {
            "Growing developer network"
        },
        if profile.languages_used.len() >= 3 {
            "Works across several programming languages"
        } else {
            "Focused on a small set of languages"
        },
    ];

    let weaknesses = [
        (profile.stars < 50, "Repositories have attracted few stars"),
        (!has_bio, "Profile bio is missing"),
        (profile.public_repos < 5, "Few public repositories to showcase"),
    ]
    .into_iter()
    .filter(|(applies, _)| *applies)
    .map(|(_, text)| text);

    GithubAnalysis {
        strengths: strengths.into_iter().map(String::from).collect(),
        weaknesses: weaknesses.map(String::from).collect(),
        recommendations: GITHUB_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
    }
}
