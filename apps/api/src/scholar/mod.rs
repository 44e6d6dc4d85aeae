//! Scholar profile acquisition: URL validation, page fetching, markup
//! extraction and the per-client fetch rate limit.

pub mod client;
pub mod handlers;
pub mod page;
pub mod rate_limit;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::scholar::ScholarProfile;

const SCHOLAR_HOST: &str = "scholar.google.com";

#[derive(Debug, Error)]
pub enum ScholarError {
    #[error("{0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Profile page returned status {0}")]
    Status(u16),

    #[error("Unrecognised profile markup: {0}")]
    Parse(String),
}

/// Source of scholar profiles. `AppState` carries it as `Arc<dyn ScholarSource>`
/// so handlers can be exercised without network access.
#[async_trait]
pub trait ScholarSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<ScholarProfile, ScholarError>;
}

/// Accepts only http(s) URLs whose host belongs to the Scholar site.
pub fn validate_profile_url(url: &str) -> Result<reqwest::Url, ScholarError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ScholarError::InvalidUrl("Profile URL is required".to_string()));
    }

    let invalid = || ScholarError::InvalidUrl("Invalid Google Scholar URL".to_string());
    let parsed = reqwest::Url::parse(url).map_err(|_| invalid())?;
    let host_ok = parsed
        .host_str()
        .map(|host| host.contains(SCHOLAR_HOST))
        .unwrap_or(false);
    if !matches!(parsed.scheme(), "http" | "https") || !host_ok {
        return Err(invalid());
    }
    Ok(parsed)
}
