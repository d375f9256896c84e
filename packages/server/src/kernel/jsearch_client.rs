use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::{BaseJobSource, ExternalJob};
use crate::config::JSearchConfig;

/// Provenance marker for jobs pulled from JSearch
pub const JSEARCH_SOURCE: &str = "jsearch";

/// JSearch (RapidAPI) client for external job listings
pub struct JSearchClient {
    config: JSearchConfig,
    client: reqwest::Client,
}

/// JSearch `/search` response
#[derive(Debug, Deserialize)]
struct JSearchResponse {
    data: Vec<ExternalJob>,
}

impl JSearchClient {
    /// Create a new JSearch client
    pub fn new(config: JSearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl BaseJobSource for JSearchClient {
    fn source_name(&self) -> &str {
        JSEARCH_SOURCE
    }

    async fn fetch_jobs(&self) -> Result<Vec<ExternalJob>> {
        tracing::debug!(query = %self.config.query, "Requesting JSearch listings");

        let response = self
            .client
            .get(self.search_url())
            .query(&[
                ("query", self.config.query.as_str()),
                ("page", "1"),
                ("num_pages", "1"),
            ])
            .header("X-RapidAPI-Key", &self.config.api_key)
            .header("X-RapidAPI-Host", &self.config.host)
            .send()
            .await
            .context("Failed to send JSearch request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("JSearch API error {}: {}", status, body);
        }

        let jsearch_response: JSearchResponse = response
            .json()
            .await
            .context("Failed to parse JSearch response")?;

        Ok(jsearch_response.data)
    }
}

/// Job source that never returns anything, for local runs without an API key
pub struct NoopJobSource;

#[async_trait]
impl BaseJobSource for NoopJobSource {
    fn source_name(&self) -> &str {
        JSEARCH_SOURCE
    }

    async fn fetch_jobs(&self) -> Result<Vec<ExternalJob>> {
        tracing::warn!("NoopJobSource: fetch called but no RapidAPI key configured");
        Ok(vec![])
    }
}
