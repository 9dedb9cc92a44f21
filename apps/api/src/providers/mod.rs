// Outbound clients for the public profile providers.
// Each client does plain sequential GETs; failures are not retried.

pub mod github;
pub mod leetcode;

use reqwest::Url;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { status: u16, url: String },

    /// The provider reports that the requested user does not exist.
    #[error("{0}")]
    NotFound(String),

    #[error("invalid provider base URL: {0}")]
    BaseUrl(String),

    /// Empty or a dot segment; cannot name a single user.
    #[error("invalid username '{0}'")]
    InvalidUsername(String),
}

/// User-Agent sent to providers. GitHub rejects requests without one.
pub(crate) const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub(crate) fn parse_base_url(base: &str) -> Result<Url, ProviderError> {
    let url = Url::parse(base).map_err(|e| ProviderError::BaseUrl(format!("{base}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ProviderError::BaseUrl(base.to_string()));
    }
    Ok(url)
}

/// Appends `segments` to the path of `base`. Each segment is percent-encoded
/// on its own, so `/`, `?` and `#` inside a username stay in that segment.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, ProviderError> {
    if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
        return Err(ProviderError::InvalidUsername(bad.to_string()));
    }
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ProviderError::BaseUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
