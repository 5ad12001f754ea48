//! Collaborators the acquisition strategies depend on.

use super::ContentDocument;
use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Caption text for a video, with whatever details came along with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub text: String,
    pub title: Option<String>,
    pub author: Option<String>,
}

/// Title, channel and description of a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDetails {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
}

/// Response body of an oEmbed endpoint. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OEmbedInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
}

/// Fetches a video's captions in a given language.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    async fn fetch_transcript(&self, url: &str, language: &str) -> Result<Transcript>;
}

/// Queries the video platform for details without needing captions.
#[async_trait]
pub trait VideoMetadataProvider: Send + Sync {
    async fn fetch_details(&self, url: &str) -> Result<VideoDetails>;
}

/// Calls a public oEmbed endpoint.
#[async_trait]
pub trait OEmbedProvider: Send + Sync {
    async fn fetch_oembed(&self, url: &str) -> Result<OEmbedInfo>;
}

/// Loads readable text from an arbitrary web page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<Vec<ContentDocument>>;
}
