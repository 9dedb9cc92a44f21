// ATS resume analysis: PDF upload, text extraction, LLM scoring against a job title.

pub mod extract;
pub mod handlers;
pub mod models;
pub mod prompts;

/// Largest accepted resume file.
pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

/// Request body ceiling for the upload route: the file plus multipart framing and the job title.
pub const RESUME_BODY_LIMIT: usize = MAX_RESUME_BYTES + 64 * 1024;
