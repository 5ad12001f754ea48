//! oEmbed client for basic video metadata.

use super::providers::{OEmbedInfo, OEmbedProvider};
use crate::error::{GistError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Queries an oEmbed endpoint over HTTP.
pub struct HttpOEmbedProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpOEmbedProvider {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl OEmbedProvider for HttpOEmbedProvider {
    #[instrument(skip(self))]
    async fn fetch_oembed(&self, url: &str) -> Result<OEmbedInfo> {
        debug!("Fetching from oEmbed endpoint {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("url", url), ("format", "json")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GistError::VideoSource(format!(
                "oEmbed endpoint returned HTTP {}",
                status
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
