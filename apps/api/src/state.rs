use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::profile::store::ProfileStore;
use crate::providers::github::GithubClient;
use crate::providers::leetcode::LeetcodeClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Postgres-backed in production, in-memory when no database is configured.
    pub store: Arc<dyn ProfileStore>,
    pub llm: LlmClient,
    pub github: GithubClient,
    pub leetcode: LeetcodeClient,
}

impl AppState {
    /// Builds the outbound clients from `config` around an already-selected store.
    pub fn new(config: &Config, store: Arc<dyn ProfileStore>) -> Result<Self> {
        let llm = LlmClient::new(
            config.cohere_api_key.clone(),
            config.cohere_api_url.clone(),
            Duration::from_secs(config.llm_timeout_secs),
        )?;
        let github = GithubClient::new(config.github_api_url.clone())?;
        let leetcode = LeetcodeClient::new(config.leetcode_api_url.clone())?;

        Ok(Self {
            store,
            llm,
            github,
            leetcode,
        })
    }
}

#[cfg(test)]
impl AppState {
    /// In-memory store with every upstream pointed at `upstream`.
    pub fn for_tests(upstream: &str) -> Self {
        use crate::profile::store::InMemoryProfileStore;

        Self::new(
            &Config::for_tests(upstream),
            Arc::new(InMemoryProfileStore::new()),
        )
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::store::InMemoryProfileStore;

    #[test]
    fn test_new_rejects_unparseable_provider_url() {
        let mut config = Config::for_tests("http://127.0.0.1:9");
        config.leetcode_api_url = "not a url".into();
        let result = AppState::new(&config, Arc::new(InMemoryProfileStore::new()));
        assert!(result.is_err());
    }
}
