//! Test doubles shared by the acquisition tests.

use super::providers::{
    OEmbedInfo, OEmbedProvider, PageFetcher, Transcript, TranscriptProvider, VideoDetails,
    VideoMetadataProvider,
};
use super::ContentDocument;
use crate::error::{GistError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts calls and returns a fixed answer.
pub struct Canned<T> {
    answer: std::result::Result<T, String>,
    calls: Arc<AtomicUsize>,
}

impl<T: Clone> Canned<T> {
    pub fn ok(value: T) -> Self {
        Self {
            answer: Ok(value),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            answer: Err(reason.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle for checking the call count after the double is moved.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    fn answer(&self) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
            .clone()
            .map_err(GistError::VideoSource)
    }
}

#[async_trait]
impl TranscriptProvider for Canned<Transcript> {
    async fn fetch_transcript(&self, _url: &str, _language: &str) -> Result<Transcript> {
        self.answer()
    }
}

#[async_trait]
impl VideoMetadataProvider for Canned<VideoDetails> {
    async fn fetch_details(&self, _url: &str) -> Result<VideoDetails> {
        self.answer()
    }
}

#[async_trait]
impl OEmbedProvider for Canned<OEmbedInfo> {
    async fn fetch_oembed(&self, _url: &str) -> Result<OEmbedInfo> {
        self.answer()
    }
}

#[async_trait]
impl PageFetcher for Canned<Vec<ContentDocument>> {
    async fn fetch_page(&self, _url: &str) -> Result<Vec<ContentDocument>> {
        self.answer()
    }
}

/// Never answers in time.
pub struct Stalled;

#[async_trait]
impl TranscriptProvider for Stalled {
    async fn fetch_transcript(&self, _url: &str, _language: &str) -> Result<Transcript> {
        tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        Err(GistError::VideoSource("unreachable".to_string()))
    }
}

/// HTTP client that ignores proxy settings from the environment.
pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
