use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// GitHub sub-document, written only by the GitHub path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubProfile {
    pub username: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    /// Sum of `stargazers_count` across the fetched repositories.
    #[serde(default)]
    pub stars: u32,
    /// 0 – 100
    #[serde(default)]
    pub score: u32,
    /// Up to 5 languages, most-used first.
    #[serde(default)]
    pub languages_used: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetcodeProfile {
    pub username: String,
    #[serde(default)]
    pub profile_url: String,
    #[serde(default)]
    pub total_solved: u32,
    #[serde(default)]
    pub easy_solved: u32,
    #[serde(default)]
    pub medium_solved: u32,
    #[serde(default)]
    pub hard_solved: u32,
    #[serde(default)]
    pub ranking: Option<u32>,
    #[serde(default)]
    pub contest_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedinProfile {
    pub username: String,
    #[serde(default)]
    pub profile_url: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub connections: u32,
    /// Number of listed skills; the list itself is not persisted.
    #[serde(default)]
    pub skills: u32,
}

/// Composite per-user profile document. At most one exists per `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: String,
    pub github: Option<GithubProfile>,
    pub leetcode: Option<LeetcodeProfile>,
    pub linkedin: Option<LinkedinProfile>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update: only the `Some` sub-documents are replaced.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfilePatch {
    pub github: Option<GithubProfile>,
    pub leetcode: Option<LeetcodeProfile>,
    pub linkedin: Option<LinkedinProfile>,
}

impl ProfilePatch {
    pub fn github(github: GithubProfile) -> Self {
        Self {
            github: Some(github),
            ..Self::default()
        }
    }

    pub fn leetcode(leetcode: LeetcodeProfile) -> Self {
        Self {
            leetcode: Some(leetcode),
            ..Self::default()
        }
    }

    pub fn linkedin(linkedin: LinkedinProfile) -> Self {
        Self {
            linkedin: Some(linkedin),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.github.is_none() && self.leetcode.is_none() && self.linkedin.is_none()
    }

    /// Replaces the provided sub-documents on `profile`, leaving the rest untouched.
    pub fn apply_to(self, profile: &mut UserProfile) {
        if let Some(github) = self.github {
            profile.github = Some(github);
        }
        if let Some(leetcode) = self.leetcode {
            profile.leetcode = Some(leetcode);
        }
        if let Some(linkedin) = self.linkedin {
            profile.linkedin = Some(linkedin);
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct UserProfileRow {
    pub id: Uuid,
    pub user_id: String,
    pub github: Option<Json<GithubProfile>>,
    pub leetcode: Option<Json<LeetcodeProfile>>,
    pub linkedin: Option<Json<LinkedinProfile>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserProfileRow> for UserProfile {
    fn from(row: UserProfileRow) -> Self {
        UserProfile {
            id: row.id,
            user_id: row.user_id,
            github: row.github.map(|Json(g)| g),
            leetcode: row.leetcode.map(|Json(l)| l),
            linkedin: row.linkedin.map(|Json(l)| l),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn empty_profile() -> UserProfile {
        let now = Utc::now();
        UserProfile {
            id: Uuid::new_v4(),
            user_id: "u1".into(),
            github: None,
            leetcode: None,
            linkedin: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_github_profile_uses_camel_case() {
        let github = GithubProfile {
            username: "octocat".into(),
            avatar_url: "https://avatars/1".into(),
            public_repos: 8,
            followers: 10,
            following: 1,
            stars: 42,
            score: 57,
            languages_used: vec!["Rust".into()],
        };
        let value = serde_json::to_value(&github).unwrap();
        assert_eq!(value["avatarUrl"], "https://avatars/1");
        assert_eq!(value["publicRepos"], 8);
        assert_eq!(value["languagesUsed"][0], "Rust");
    }

    #[test]
    fn test_sub_documents_default_missing_numbers() {
        let leetcode: LeetcodeProfile = serde_json::from_value(json!({"username": "lee"})).unwrap();
        assert_eq!(leetcode.total_solved, 0);
        assert_eq!(leetcode.ranking, None);
    }

    #[test]
    fn test_patch_only_replaces_provided_fields() {
        let mut profile = empty_profile();
        profile.leetcode = Some(LeetcodeProfile {
            username: "lee".into(),
            profile_url: String::new(),
            total_solved: 10,
            easy_solved: 10,
            medium_solved: 0,
            hard_solved: 0,
            ranking: None,
            contest_rating: None,
        });
        let before = profile.leetcode.clone();

        ProfilePatch::linkedin(LinkedinProfile {
            username: "jane".into(),
            profile_url: String::new(),
            headline: "Engineer".into(),
            followers: 1,
            connections: 2,
            skills: 3,
        })
        .apply_to(&mut profile);

        assert_eq!(profile.leetcode, before);
        assert_eq!(profile.linkedin.as_ref().map(|l| l.skills), Some(3));
        assert!(profile.github.is_none());
    }

    #[test]
    fn test_empty_patch() {
        assert!(ProfilePatch::default().is_empty());
    }
}
