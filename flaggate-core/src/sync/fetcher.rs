//! Rule snapshot fetching

use crate::models::RuleSnapshot;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Source of complete rule snapshots
#[async_trait]
pub trait RuleFetcher: Send + Sync {
    async fn fetch(&self) -> Result<RuleSnapshot>;
}

/// Fetches snapshots from `<sdk_endpoint>/flags` with bearer authentication
pub struct HttpRuleFetcher {
    base_url: String,
    token: String,
    client: Client,
}

impl HttpRuleFetcher {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(anyhow::anyhow!("Server error {}: {}", status, body.trim()))
        }
    }
}

#[async_trait]
impl RuleFetcher for HttpRuleFetcher {
    async fn fetch(&self) -> Result<RuleSnapshot> {
        let response = self
            .client
            .get(self.endpoint("flags"))
            .bearer_auth(&self.token)
            .send()
            .await
            .context("Failed to reach SDK endpoint")?;

        let response = Self::ensure_success(response).await?;
        let snapshot = response
            .json::<RuleSnapshot>()
            .await
            .context("Failed to parse rule snapshot")?;
        Ok(snapshot)
    }
}
