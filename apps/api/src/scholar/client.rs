use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::models::scholar::ScholarProfile;
use crate::scholar::page::parse_profile_html;
use crate::scholar::{validate_profile_url, ScholarError, ScholarSource};

/// Profile pages are served to browsers only.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Fetches profile pages over HTTP and extracts them with `parse_profile_html`.
#[derive(Clone)]
pub struct HttpScholarSource {
    client: Client,
}

impl HttpScholarSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build Scholar HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ScholarSource for HttpScholarSource {
    async fn fetch(&self, url: &str) -> Result<ScholarProfile, ScholarError> {
        let url = validate_profile_url(url)?;
        debug!(%url, "fetching scholar profile");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScholarError::Status(status.as_u16()));
        }

        let html = response.text().await?;
        let profile = parse_profile_html(&html)?;
        info!(
            name = %profile.name,
            interests = profile.research_interests.len(),
            publications = profile.publications.len(),
            "fetched scholar profile"
        );
        Ok(profile)
    }
}
