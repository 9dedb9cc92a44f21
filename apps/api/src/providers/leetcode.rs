//! LeetCode community stats API client.

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::models::lenient::{opt_f64_lenient, opt_i64_lenient, opt_u32_lenient, u32_or_zero};
use crate::models::profile::LeetcodeProfile;
use crate::providers::{join_segments, parse_base_url, ProviderError, USER_AGENT};
use crate::scoring::leetcode::LeetcodeScoreInput;

/// Stats as returned by `GET /{username}`. Also accepted back from clients
/// as the input for analysis, so every numeric field is lenient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeetcodeStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(deserialize_with = "u32_or_zero")]
    pub total_solved: u32,
    #[serde(deserialize_with = "u32_or_zero")]
    pub total_questions: u32,
    #[serde(deserialize_with = "u32_or_zero")]
    pub easy_solved: u32,
    #[serde(deserialize_with = "u32_or_zero")]
    pub total_easy: u32,
    #[serde(deserialize_with = "u32_or_zero")]
    pub medium_solved: u32,
    #[serde(deserialize_with = "u32_or_zero")]
    pub total_medium: u32,
    #[serde(deserialize_with = "u32_or_zero")]
    pub hard_solved: u32,
    #[serde(deserialize_with = "u32_or_zero")]
    pub total_hard: u32,
    #[serde(deserialize_with = "opt_f64_lenient")]
    pub acceptance_rate: Option<f64>,
    #[serde(deserialize_with = "opt_u32_lenient")]
    pub ranking: Option<u32>,
    #[serde(deserialize_with = "opt_i64_lenient")]
    pub contribution_points: Option<i64>,
    #[serde(deserialize_with = "opt_i64_lenient")]
    pub reputation: Option<i64>,
    #[serde(deserialize_with = "opt_f64_lenient")]
    pub contest_rating: Option<f64>,
}

impl LeetcodeStats {
    fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }

    pub fn score_input(&self) -> LeetcodeScoreInput {
        LeetcodeScoreInput {
            total_solved: self.total_solved,
            total_questions: self.total_questions,
            easy_solved: self.easy_solved,
            total_easy: self.total_easy,
            medium_solved: self.medium_solved,
            total_medium: self.total_medium,
            hard_solved: self.hard_solved,
            total_hard: self.total_hard,
            acceptance_rate: self.acceptance_rate,
            ranking: self.ranking,
        }
    }

    /// Persisted sub-document for `username`.
    pub fn to_profile(&self, username: &str) -> LeetcodeProfile {
        LeetcodeProfile {
            username: username.to_string(),
            profile_url: format!("https://leetcode.com/{username}"),
            total_solved: self.total_solved,
            easy_solved: self.easy_solved,
            medium_solved: self.medium_solved,
            hard_solved: self.hard_solved,
            ranking: self.ranking.filter(|r| *r > 0),
            contest_rating: self.contest_rating,
        }
    }
}

#[derive(Clone)]
pub struct LeetcodeClient {
    client: Client,
    base_url: Url,
}

impl LeetcodeClient {
    pub fn new(base_url: String) -> Result<Self, ProviderError> {
        Ok(Self {
            client: Client::builder().user_agent(USER_AGENT).build()?,
            base_url: parse_base_url(&base_url)?,
        })
    }

    /// An unknown user is reported in-band as `{"status": "error"}`.
    pub async fn fetch_stats(&self, username: &str) -> Result<LeetcodeStats, ProviderError> {
        let url = join_segments(&self.base_url, &[username])?;
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let stats: LeetcodeStats = response.json().await?;
        if stats.is_error() {
            return Err(ProviderError::NotFound(
                "LeetCode profile not found".to_string(),
            ));
        }
        Ok(stats)
    }
}
