//! PDF text extraction for uploaded resumes.

use bytes::Bytes;
use thiserror::Error;

/// Shorter extracted text is treated as unreadable.
pub const MIN_TEXT_CHARS: usize = 50;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to parse PDF: {0}")]
    Pdf(String),

    #[error("PDF extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Extracts and cleans the text of a PDF.
/// Parsing runs on the blocking pool; a panic inside the parser surfaces as [`ExtractError::Task`].
pub async fn extract_resume_text(data: Bytes) -> Result<String, ExtractError> {
    let raw = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await?
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;
    Ok(clean_text(&raw))
}

/// Collapses whitespace runs to a single space and drops anything outside printable ASCII.
pub fn clean_text(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .filter(|c| matches!(c, ' '..='~'))
        .collect::<String>()
        .trim()
        .to_string()
}
