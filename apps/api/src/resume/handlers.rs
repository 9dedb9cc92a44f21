use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::LlmRequest;
use crate::resume::extract::{extract_resume_text, MIN_TEXT_CHARS};
use crate::resume::models::{normalize_ats, AtsAnalysis};
use crate::resume::prompts::ats_analysis_prompt;
use crate::resume::MAX_RESUME_BYTES;
use crate::state::AppState;

const ATS_TEMPERATURE: f32 = 0.1;
const ATS_MAX_TOKENS: u32 = 1500;

const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/x-pdf",
    "application/acrobat",
    "applications/vnd.pdf",
    "text/pdf",
    "text/x-pdf",
];

/// Parsed `multipart/form-data` body: `jobTitle` text plus the `resume` file.
#[derive(Debug, Default)]
pub struct ResumeUpload {
    pub job_title: Option<String>,
    pub resume: Option<Bytes>,
}

impl ResumeUpload {
    /// Rejects a non-PDF `resume` part before reading it, and any file over the size ceiling.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut upload = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "jobTitle" => {
                    upload.job_title = Some(field.text().await?);
                }
                "resume" => {
                    let content_type = field.content_type().unwrap_or("").to_ascii_lowercase();
                    if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
                        return Err(AppError::UnsupportedMediaType(
                            "Only PDF files are allowed".to_string(),
                        ));
                    }
                    let data = field.bytes().await?;
                    if data.len() > MAX_RESUME_BYTES {
                        return Err(AppError::PayloadTooLarge(
                            "Resume must be 10 MB or smaller".to_string(),
                        ));
                    }
                    upload.resume = Some(data);
                }
                _ => {}
            }
        }

        Ok(upload)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysisResponse {
    pub success: bool,
    pub job_title: String,
    pub analysis: AtsAnalysis,
    pub fallback: bool,
    pub timestamp: DateTime<Utc>,
}

/// POST /api/resume-analyze
pub async fn handle_resume_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ResumeAnalysisResponse>, AppError> {
    let upload = ResumeUpload::from_multipart(multipart).await?;

    let job_title = upload
        .job_title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::Validation("Job title is required and must be a non-empty string.".to_string())
        })?
        .to_string();
    let resume = upload
        .resume
        .ok_or_else(|| AppError::Validation("Resume PDF file is required.".to_string()))?;
    if resume.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty.".to_string()));
    }

    let text = extract_resume_text(resume).await.map_err(|e| {
        warn!("resume extraction failed: {e}");
        AppError::Validation(
            "Failed to parse PDF. Please ensure the file is a valid PDF document.".to_string(),
        )
    })?;
    if text.chars().count() < MIN_TEXT_CHARS {
        return Err(AppError::Validation(
            "Resume content is too short or unreadable. Please upload a detailed resume."
                .to_string(),
        ));
    }

    let prompt = ats_analysis_prompt(&job_title, &text);
    let request = LlmRequest::chat(&prompt, ATS_TEMPERATURE).with_max_tokens(ATS_MAX_TOKENS);
    let reply = state.llm.complete_text(&request).await?;

    let outcome = normalize_ats(&reply);
    let fallback = outcome.is_fallback();
    let analysis = outcome.into_inner();
    info!(job_title = %job_title, ats_score = analysis.ats_score, fallback, "resume analyzed");

    Ok(Json(ResumeAnalysisResponse {
        success: true,
        job_title,
        analysis,
        fallback,
        timestamp: Utc::now(),
    }))
}
