use tracing::info;

use crate::errors::AppError;
use crate::models::profile::{ProfilePatch, UserProfile};
use crate::scoring::MAX_SCORE;

const MAX_LANGUAGES: usize = 5;
use crate::profile::store::ProfileStore;

/// Merges `patch` into the document for `user_id`, creating it if absent.
///
/// Rejects a missing/blank `user_id`, an empty patch, or a sub-document that
/// breaks its invariants (see [`validate_patch`]) before touching the
/// store. Storage failures surface as `AppError::Persistence` with the
/// store's message; nothing is retried.
pub async fn upsert_profile(
    store: &dyn ProfileStore,
    user_id: Option<&str>,
    patch: ProfilePatch,
) -> Result<UserProfile, AppError> {
    let user_id = require_user_id(user_id)?;

    if patch.is_empty() {
        return Err(AppError::Validation(
            "at least one of github, leetcode or linkedin is required".to_string(),
        ));
    }
    validate_patch(&patch)?;

    let profile = store.upsert(user_id, patch).await?;
    info!(user_id = %profile.user_id, "profile upserted");
    Ok(profile)
}

/// Every provided sub-document needs a non-blank `username`; a GitHub
/// sub-document also needs `score` within 0 – 100 and at most five languages.
pub fn validate_patch(patch: &ProfilePatch) -> Result<(), AppError> {
    let usernames = [
        ("github", patch.github.as_ref().map(|g| g.username.as_str())),
        ("leetcode", patch.leetcode.as_ref().map(|l| l.username.as_str())),
        ("linkedin", patch.linkedin.as_ref().map(|l| l.username.as_str())),
    ];
    for (field, username) in usernames {
        if username.is_some_and(|u| u.trim().is_empty()) {
            return Err(AppError::Validation(format!("{field}.username is required")));
        }
    }

    if let Some(github) = &patch.github {
        if github.score > MAX_SCORE {
            return Err(AppError::Validation(format!(
                "github.score must be between 0 and {MAX_SCORE}"
            )));
        }
        if github.languages_used.len() > MAX_LANGUAGES {
            return Err(AppError::Validation(format!(
                "github.languagesUsed holds at most {MAX_LANGUAGES} languages"
            )));
        }
    }
    Ok(())
}

/// Trims `user_id` and rejects it when absent or blank.
pub fn require_user_id(user_id: Option<&str>) -> Result<&str, AppError> {
    user_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Validation("userId is required".to_string()))
}
