pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::profile::handlers as profile;
use crate::resume::{handlers as resume, RESUME_BODY_LIMIT};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Provider analysis
        .route("/api/analyze/github", post(analysis::handle_analyze_github))
        .route("/api/leetcode/:username", get(analysis::handle_get_leetcode))
        .route(
            "/api/analyze/leetcode",
            post(analysis::handle_analyze_leetcode),
        )
        .route(
            "/api/linkedin/generate",
            post(analysis::handle_linkedin_generate),
        )
        // Resume
        .route(
            "/api/resume-analyze",
            post(resume::handle_resume_analyze).layer(DefaultBodyLimit::max(RESUME_BODY_LIMIT)),
        )
        // Profile documents
        .route("/api/profile", post(profile::handle_save_profile))
        .route("/api/profile/github", post(profile::handle_sync_github))
        .route("/api/profile/leetcode", post(profile::handle_sync_leetcode))
        .route("/api/profile/linkedin", post(profile::handle_save_linkedin))
        // Misspelled path still posted to by older clients
        .route("/api/profile/linkdin", post(profile::handle_save_linkedin))
        .route("/api/profile/:user_id", get(profile::handle_get_profile))
        .with_state(state)
}
