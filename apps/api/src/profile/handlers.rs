use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::lenient::u32_or_zero;
use crate::models::profile::{
    GithubProfile, LeetcodeProfile, LinkedinProfile, ProfilePatch, UserProfile,
};
use crate::profile::upsert::{require_user_id, upsert_profile, validate_patch};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProfileRequest {
    pub user_id: Option<String>,
    pub github: Option<GithubProfile>,
    pub leetcode: Option<LeetcodeProfile>,
    pub linkedin: Option<LinkedinProfile>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub message: &'static str,
    pub profile: UserProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

/// POST /api/profile
///
/// 201 when the document is created, 200 when an existing one is merged.
pub async fn handle_save_profile(
    State(state): State<AppState>,
    Json(req): Json<SaveProfileRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), AppError> {
    let user_id = require_user_id(req.user_id.as_deref())?;
    let patch = ProfilePatch {
        github: req.github,
        leetcode: req.leetcode,
        linkedin: req.linkedin,
    };
    if patch.is_empty() {
        return Err(AppError::Validation(
            "at least one of github, leetcode or linkedin is required".to_string(),
        ));
    }
    validate_patch(&patch)?;

    let existed = state.store.find(user_id).await?.is_some();
    let profile = upsert_profile(state.store.as_ref(), Some(user_id), patch).await?;

    let (status, message) = if existed {
        (StatusCode::OK, "Profile updated")
    } else {
        (StatusCode::CREATED, "Profile created")
    };
    Ok((
        status,
        Json(ProfileResponse {
            message,
            profile,
            score: None,
        }),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSyncRequest {
    pub user_id: Option<String>,
    pub username: Option<String>,
}

impl ProviderSyncRequest {
    fn validate(&self) -> Result<(&str, &str), AppError> {
        let user_id = require_user_id(self.user_id.as_deref())?;
        let username = self
            .username
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Validation("userId and username are required".to_string()))?;
        Ok((user_id, username))
    }
}

/// POST /api/profile/github
pub async fn handle_sync_github(
    State(state): State<AppState>,
    Json(req): Json<ProviderSyncRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let (user_id, username) = req.validate()?;

    let aggregate = state.github.fetch_aggregate(username).await?;
    let score = aggregate.profile.score;
    let profile = upsert_profile(
        state.store.as_ref(),
        Some(user_id),
        ProfilePatch::github(aggregate.profile),
    )
    .await?;

    Ok(Json(ProfileResponse {
        message: "GitHub data saved successfully",
        profile,
        score: Some(score),
    }))
}

/// POST /api/profile/leetcode
pub async fn handle_sync_leetcode(
    State(state): State<AppState>,
    Json(req): Json<ProviderSyncRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let (user_id, username) = req.validate()?;

    let stats = state.leetcode.fetch_stats(username).await?;
    let profile = upsert_profile(
        state.store.as_ref(),
        Some(user_id),
        ProfilePatch::leetcode(stats.to_profile(username)),
    )
    .await?;

    Ok(Json(ProfileResponse {
        message: "LeetCode data saved successfully",
        profile,
        score: None,
    }))
}

/// Form-style LinkedIn input: counters may arrive as numeric strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedinSaveRequest {
    pub user_id: Option<String>,
    pub username: Option<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub followers: u32,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub connections: u32,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub skills: u32,
}

#[derive(Debug, Serialize)]
pub struct LinkedinSaveResponse {
    pub message: &'static str,
    pub linkedin: Option<LinkedinProfile>,
    pub success: bool,
}

/// POST /api/profile/linkedin
pub async fn handle_save_linkedin(
    State(state): State<AppState>,
    Json(req): Json<LinkedinSaveRequest>,
) -> Result<Json<LinkedinSaveResponse>, AppError> {
    let user_id = require_user_id(req.user_id.as_deref())?;
    let username = req
        .username
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("username is required".to_string()))?;

    let linkedin = LinkedinProfile {
        username: username.to_string(),
        profile_url: req.profile_url.unwrap_or_default(),
        headline: req.headline.unwrap_or_default(),
        followers: req.followers,
        connections: req.connections,
        skills: req.skills,
    };
    let profile = upsert_profile(
        state.store.as_ref(),
        Some(user_id),
        ProfilePatch::linkedin(linkedin),
    )
    .await?;

    Ok(Json(LinkedinSaveResponse {
        message: "LinkedIn data saved successfully",
        linkedin: profile.linkedin,
        success: true,
    }))
}

/// GET /api/profile/:user_id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    state
        .store
        .find(&user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::routes::build_router;
    use crate::state::AppState;

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn offline_app() -> Router {
        build_router(AppState::for_tests("http://127.0.0.1:9"))
    }

    #[tokio::test]
    async fn test_save_profile_creates_then_merges() {
        let app = offline_app();

        let (status, body) = send(
            &app,
            post(
                "/api/profile",
                json!({"userId": "u1", "leetcode": {"username": "lee215", "totalSolved": 10}}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Profile created");
        assert_eq!(body["profile"]["leetcode"]["totalSolved"], 10);
        assert!(body["profile"]["github"].is_null());

        let (status, body) = send(
            &app,
            post(
                "/api/profile",
                json!({"userId": "u1", "github": {"username": "octocat", "score": 40}}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Profile updated");
        assert_eq!(body["profile"]["github"]["score"], 40);
        assert_eq!(body["profile"]["leetcode"]["username"], "lee215");
    }

    #[tokio::test]
    async fn test_save_profile_without_user_id_is_rejected() {
        let app = offline_app();
        let (status, body) = send(
            &app,
            post("/api/profile", json!({"leetcode": {"username": "lee215"}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_save_profile_rejects_invalid_github_document() {
        let app = offline_app();
        let (status, body) = send(
            &app,
            post(
                "/api/profile",
                json!({
                    "userId": "u9",
                    "github": {
                        "username": "x",
                        "score": 250,
                        "languagesUsed": ["A", "B", "C", "D", "E", "F", "G"]
                    }
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = send(&app, get("/api/profile/u9")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_missing_profile_is_404() {
        let (status, body) = send(&offline_app(), get("/api/profile/nobody")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Profile not found");
    }

    #[tokio::test]
    async fn test_linkedin_save_accepts_numeric_strings() {
        let app = offline_app();
        let (status, body) = send(
            &app,
            post(
                "/api/profile/linkedin",
                json!({
                    "userId": "u2",
                    "username": "ada",
                    "followers": "1200",
                    "connections": 500,
                    "skills": "lots"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["linkedin"]["followers"], 1200);
        assert_eq!(body["linkedin"]["connections"], 500);
        assert_eq!(body["linkedin"]["skills"], 0);
        assert_eq!(body["linkedin"]["headline"], "");

        let (status, body) = send(&app, get("/api/profile/u2")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["userId"], "u2");
        assert_eq!(body["linkedin"]["username"], "ada");
    }

    #[tokio::test]
    async fn test_linkedin_save_legacy_path_is_an_alias() {
        let app = offline_app();
        let (status, body) = send(
            &app,
            post(
                "/api/profile/linkdin",
                json!({"userId": "u3", "username": "ada", "followers": 7}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["linkedin"]["followers"], 7);

        let (_, body) = send(&app, get("/api/profile/u3")).await;
        assert_eq!(body["linkedin"]["username"], "ada");
    }

    #[tokio::test]
    async fn test_linkedin_save_requires_username() {
        let (status, body) = send(
            &offline_app(),
            post("/api/profile/linkedin", json!({"userId": "u2"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "username is required");
    }

    #[tokio::test]
    async fn test_sync_github_scores_and_persists() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "login": "octocat",
                "public_repos": 20,
                "followers": 100,
                "following": 0
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let app = build_router(AppState::for_tests(&server.uri()));
        let (status, body) = send(
            &app,
            post("/api/profile/github", json!({"userId": "u3", "username": "octocat"})),
        )
        .await;

        // repos 25 + followers 20, no stars, no completeness, no languages
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 45);
        assert_eq!(body["profile"]["github"]["score"], 45);
        assert_eq!(body["profile"]["github"]["username"], "octocat");
    }

    #[tokio::test]
    async fn test_sync_leetcode_unknown_user_is_404_and_not_persisted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nobody"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "error",
                "message": "user does not exist"
            })))
            .mount(&server)
            .await;

        let app = build_router(AppState::for_tests(&server.uri()));
        let (status, body) = send(
            &app,
            post("/api/profile/leetcode", json!({"userId": "u4", "username": "nobody"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "LeetCode profile not found");

        let (status, _) = send(&app, get("/api/profile/u4")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_sync_leetcode_persists_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lee215"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "totalSolved": 150,
                "easySolved": 80,
                "mediumSolved": 60,
                "hardSolved": 10,
                "ranking": 0
            })))
            .mount(&server)
            .await;

        let app = build_router(AppState::for_tests(&server.uri()));
        let (status, body) = send(
            &app,
            post("/api/profile/leetcode", json!({"userId": "u5", "username": "lee215"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "LeetCode data saved successfully");
        assert_eq!(body["profile"]["leetcode"]["profileUrl"], "https://leetcode.com/lee215");
        assert!(body["profile"]["leetcode"]["ranking"].is_null());
        assert!(body.get("score").is_none());
    }
}
