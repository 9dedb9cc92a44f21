use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::AnalysisShape;

/// AI commentary on a LeetCode profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetcodeAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub next_recommended_questions: Vec<String>,
}

impl AnalysisShape for LeetcodeAnalysis {
    const REQUIRED_ARRAYS: &'static [&'static str] =
        &["strengths", "weaknesses", "nextRecommendedQuestions"];
}

/// AI commentary on a GitHub profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

impl AnalysisShape for GithubAnalysis {
    const REQUIRED_ARRAYS: &'static [&'static str] = &["strengths", "weaknesses", "recommendations"];
}
