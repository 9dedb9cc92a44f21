//! GitHub public REST API client and repository aggregation.

use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::profile::GithubProfile;
use crate::providers::{join_segments, parse_base_url, ProviderError, USER_AGENT};
use crate::scoring::github::{compute_github_display_score, compute_github_score, GithubScoreInput};

const REPOS_PER_PAGE: &str = "100";
const TOP_LANGUAGES: usize = 5;

/// `GET /users/{username}`. Only the fields the dashboard uses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubUser {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub blog: Option<String>,
    pub twitter_username: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
}

/// One element of `GET /users/{username}/repos`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GithubRepo {
    pub language: Option<String>,
    pub stargazers_count: u32,
}

#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    base_url: Url,
}

impl GithubClient {
    pub fn new(base_url: String) -> Result<Self, ProviderError> {
        Ok(Self {
            client: Client::builder().user_agent(USER_AGENT).build()?,
            base_url: parse_base_url(&base_url)?,
        })
    }

    pub async fn fetch_user(&self, username: &str) -> Result<GithubUser, ProviderError> {
        let url = join_segments(&self.base_url, &["users", username])?;
        self.get_json(url).await
    }

    /// First page (up to 100) of the user's public repositories.
    pub async fn fetch_repos(&self, username: &str) -> Result<Vec<GithubRepo>, ProviderError> {
        let mut url = join_segments(&self.base_url, &["users", username, "repos"])?;
        url.query_pairs_mut().append_pair("per_page", REPOS_PER_PAGE);
        self.get_json(url).await
    }

    /// Fetches the user, then their repositories, and aggregates both.
    pub async fn fetch_aggregate(&self, username: &str) -> Result<GithubAggregate, ProviderError> {
        let user = self.fetch_user(username).await?;
        let repos = self.fetch_repos(username).await?;
        debug!(username, repos = repos.len(), "fetched GitHub profile");
        Ok(GithubAggregate::from_parts(user, &repos))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, ProviderError> {
        let response = self.client.get(url.clone()).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(ProviderError::NotFound(
                "GitHub user not found".to_string(),
            )),
            status if !status.is_success() => Err(ProviderError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }),
            _ => Ok(response.json().await?),
        }
    }
}

/// GitHub user plus the figures derived from their repositories.
#[derive(Debug, Clone)]
pub struct GithubAggregate {
    pub user: GithubUser,
    /// Persisted sub-document, including the six-term score.
    pub profile: GithubProfile,
    /// Instant-display score; not reconciled with `profile.score`.
    pub display_score: u32,
}

impl GithubAggregate {
    pub fn from_parts(user: GithubUser, repos: &[GithubRepo]) -> Self {
        let languages = top_languages(repos);
        let stars = total_stars(repos);
        let input = score_input(&user, stars, languages.len());

        let profile = GithubProfile {
            username: user.login.clone(),
            avatar_url: user.avatar_url.clone(),
            public_repos: user.public_repos,
            followers: user.followers,
            following: user.following,
            stars,
            score: compute_github_score(&input),
            languages_used: languages,
        };

        Self {
            display_score: compute_github_display_score(&input),
            user,
            profile,
        }
    }
}

/// Up to five languages by repository count, most frequent first.
/// Ties keep the order in which the language was first seen.
pub fn top_languages(repos: &[GithubRepo]) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for lang in repos.iter().filter_map(|r| r.language.as_deref()) {
        match counts.iter_mut().find(|(name, _)| *name == lang) {
            Some((_, count)) => *count += 1,
            None => counts.push((lang, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(TOP_LANGUAGES)
        .map(|(lang, _)| lang.to_string())
        .collect()
}

pub fn total_stars(repos: &[GithubRepo]) -> u32 {
    repos
        .iter()
        .fold(0u32, |acc, r| acc.saturating_add(r.stargazers_count))
}

pub fn score_input(user: &GithubUser, total_stars: u32, top_language_count: usize) -> GithubScoreInput {
    GithubScoreInput {
        public_repos: user.public_repos,
        followers: user.followers,
        total_stars,
        has_bio: is_present(&user.bio),
        has_company: is_present(&user.company),
        has_location: is_present(&user.location),
        has_blog: is_present(&user.blog),
        has_twitter: is_present(&user.twitter_username),
        top_language_count,
    }
}

fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}
