use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::analysis::fallback::{github_fallback, leetcode_fallback};
use crate::analysis::linkedin::{parse_linkedin_output, LinkedinDraft, LinkedinGenerateRequest};
use crate::analysis::models::{GithubAnalysis, LeetcodeAnalysis};
use crate::analysis::normalizer::normalize;
use crate::analysis::prompts::{
    github_analysis_prompt, leetcode_analysis_prompt, linkedin_generation_prompt,
};
use crate::errors::AppError;
use crate::llm_client::LlmRequest;
use crate::models::profile::GithubProfile;
use crate::providers::leetcode::LeetcodeStats;
use crate::scoring::leetcode::compute_leetcode_score;
use crate::scoring::score_label;
use crate::state::AppState;

const ANALYSIS_TEMPERATURE: f32 = 0.3;
const LINKEDIN_TEMPERATURE: f32 = 0.6;
const LINKEDIN_MAX_TOKENS: u32 = 500;

#[derive(Debug, Deserialize)]
pub struct GithubAnalyzeRequest {
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubAnalyzeResponse {
    pub profile: GithubProfile,
    pub score: u32,
    pub display_score: u32,
    pub score_label: &'static str,
    pub analysis: GithubAnalysis,
    pub fallback: bool,
}

/// POST /api/analyze/github
pub async fn handle_analyze_github(
    State(state): State<AppState>,
    Json(req): Json<GithubAnalyzeRequest>,
) -> Result<Json<GithubAnalyzeResponse>, AppError> {
    let username = required(&req.username, "username")?;

    let aggregate = state.github.fetch_aggregate(username).await?;
    let prompt = github_analysis_prompt(&aggregate);
    let text = state
        .llm
        .complete_text(&LlmRequest::chat(&prompt, ANALYSIS_TEMPERATURE))
        .await?;

    let outcome = normalize(&text, || github_fallback(&aggregate));
    let fallback = outcome.is_fallback();
    let score = aggregate.profile.score;
    info!(username, score, fallback, "GitHub profile analyzed");

    Ok(Json(GithubAnalyzeResponse {
        score,
        display_score: aggregate.display_score,
        score_label: score_label(score),
        analysis: outcome.into_inner(),
        fallback,
        profile: aggregate.profile,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetcodeStatsResponse {
    #[serde(flatten)]
    pub stats: LeetcodeStats,
    pub score: u32,
    pub score_label: &'static str,
}

/// GET /api/leetcode/:username
pub async fn handle_get_leetcode(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<LeetcodeStatsResponse>, AppError> {
    let stats = state.leetcode.fetch_stats(&username).await?;
    let score = compute_leetcode_score(&stats.score_input());
    Ok(Json(LeetcodeStatsResponse {
        stats,
        score,
        score_label: score_label(score),
    }))
}

#[derive(Debug, Deserialize)]
pub struct LeetcodeAnalyzeRequest {
    pub data: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetcodeAnalyzeResponse {
    pub analysis: LeetcodeAnalysis,
    pub fallback: bool,
    pub score: u32,
    pub score_label: &'static str,
}

/// POST /api/analyze/leetcode
///
/// `data` must be the stats object; free-form text is rejected.
pub async fn handle_analyze_leetcode(
    State(state): State<AppState>,
    Json(req): Json<LeetcodeAnalyzeRequest>,
) -> Result<Json<LeetcodeAnalyzeResponse>, AppError> {
    let stats = match req.data {
        None | Some(Value::Null) => {
            return Err(AppError::Validation("data is required".to_string()))
        }
        Some(Value::Object(map)) if map.is_empty() => {
            return Err(AppError::Validation("Empty data provided".to_string()))
        }
        Some(data @ Value::Object(_)) => serde_json::from_value::<LeetcodeStats>(data)
            .map_err(|e| AppError::Validation(format!("Invalid data format: {e}")))?,
        Some(_) => return Err(AppError::Validation("Invalid data format".to_string())),
    };

    let prompt = leetcode_analysis_prompt(&stats);
    let text = state
        .llm
        .complete_text(&LlmRequest::chat(&prompt, ANALYSIS_TEMPERATURE))
        .await?;

    let outcome = normalize(&text, || leetcode_fallback(&stats));
    let score = compute_leetcode_score(&stats.score_input());

    Ok(Json(LeetcodeAnalyzeResponse {
        fallback: outcome.is_fallback(),
        analysis: outcome.into_inner(),
        score,
        score_label: score_label(score),
    }))
}

/// POST /api/linkedin/generate
pub async fn handle_linkedin_generate(
    State(state): State<AppState>,
    Json(req): Json<LinkedinGenerateRequest>,
) -> Result<Json<LinkedinDraft>, AppError> {
    let input = req.validate()?;
    let prompt = linkedin_generation_prompt(&input);

    let request =
        LlmRequest::completion(&prompt, LINKEDIN_TEMPERATURE).with_max_tokens(LINKEDIN_MAX_TOKENS);
    let output = state.llm.complete_text(&request).await?;

    Ok(Json(parse_linkedin_output(&output, &input)))
}

fn required<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str, AppError> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{name} is required")))
}
