//! Client for a running Portfolio API

use anyhow::{Context, Result};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Status and decoded JSON body of one API call
#[derive(Debug)]
pub struct ApiResponse {
    pub status: reqwest::StatusCode,
    pub body: serde_json::Value,
}

/// Client for interacting with the Portfolio API
pub struct PortfolioClient {
    base_url: String,
    client: reqwest::Client,
}

impl PortfolioClient {
    /// Create a new client; `base_url` is the site root without `/api`
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET an API path such as `/api/portfolio`
    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        Self::decode(response).await
    }

    /// POST a JSON body to an API path
    pub async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<ApiResponse> {
        let status = response.status();
        let text = response.text().await.context("Failed to read response body")?;

        // Error pages are not always JSON
        let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_strips_trailing_slash() {
        let client = PortfolioClient::new("http://localhost:8001/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8001");
    }
}
