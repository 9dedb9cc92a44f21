use anyhow::{Context, Result};

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_LEETCODE_API_URL: &str = "https://leetcode-stats-api.herokuapp.com";
const DEFAULT_COHERE_API_URL: &str = "https://api.cohere.ai/v1";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// When unset the service runs against the in-memory profile store.
    pub database_url: Option<String>,
    pub cohere_api_key: String,
    pub cohere_api_url: String,
    pub github_api_url: String,
    pub leetcode_api_url: String,
    pub cors_origin: String,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            cohere_api_key: require_env("COHERE_API_KEY")?,
            cohere_api_url: env_or("COHERE_API_URL", DEFAULT_COHERE_API_URL),
            github_api_url: env_or("GITHUB_API_URL", DEFAULT_GITHUB_API_URL),
            leetcode_api_url: env_or("LEETCODE_API_URL", DEFAULT_LEETCODE_API_URL),
            cors_origin: env_or("CORS_ORIGIN", DEFAULT_CORS_ORIGIN),
            llm_timeout_secs: env_or("LLM_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            port: env_or("PORT", "3000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
impl Config {
    /// Configuration pointing every upstream at the given base URL.
    pub fn for_tests(upstream: &str) -> Self {
        Config {
            database_url: None,
            cohere_api_key: "test-key".to_string(),
            cohere_api_url: upstream.to_string(),
            github_api_url: upstream.to_string(),
            leetcode_api_url: upstream.to_string(),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            llm_timeout_secs: 5,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
