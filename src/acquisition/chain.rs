//! The video acquisition chain.
//!
//! Strategies run in a fixed order and the first success wins. A failing or
//! timed-out strategy hands over to the next one; nothing is retried.

use super::providers::{OEmbedProvider, TranscriptProvider, VideoMetadataProvider};
use super::{ContentDocument, Documents};
use crate::error::{GistError, Result};
use crate::progress::ProgressObserver;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// The video a chain run is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoTarget {
    pub url: String,
    pub video_id: String,
}

/// One way of getting content for a video.
#[async_trait]
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn acquire(&self, target: &VideoTarget, observer: &dyn ProgressObserver)
        -> Result<Documents>;
}

/// Captions in the configured language.
pub struct TranscriptStrategy {
    provider: Arc<dyn TranscriptProvider>,
    language: String,
}

impl TranscriptStrategy {
    pub fn new(provider: Arc<dyn TranscriptProvider>, language: &str) -> Self {
        Self {
            provider,
            language: language.to_string(),
        }
    }
}

#[async_trait]
impl Strategy for TranscriptStrategy {
    fn name(&self) -> &'static str {
        "transcript"
    }

    async fn acquire(
        &self,
        target: &VideoTarget,
        observer: &dyn ProgressObserver,
    ) -> Result<Documents> {
        let transcript = self
            .provider
            .fetch_transcript(&target.url, &self.language)
            .await?;

        if transcript.text.trim().is_empty() {
            return Err(GistError::VideoSource("Transcript is empty".to_string()));
        }

        let mut doc = ContentDocument::new(transcript.text)
            .with_metadata("source", target.url.as_str())
            .with_metadata("video_id", target.video_id.as_str());
        if let Some(title) = transcript.title {
            doc = doc.with_metadata("title", title);
        }
        if let Some(author) = transcript.author {
            doc = doc.with_metadata("author", author);
        }

        observer.info(&format!("Video Title: {}", doc.meta("title").unwrap_or("Unknown")));
        observer.info(&format!("Channel: {}", doc.meta("author").unwrap_or("Unknown")));
        observer.info(&format!("Transcript Length: {} words", doc.word_count()));

        Ok(Documents::single(doc))
    }
}

/// Title, channel and description straight from the platform.
pub struct DirectMetadataStrategy {
    provider: Arc<dyn VideoMetadataProvider>,
}

impl DirectMetadataStrategy {
    pub fn new(provider: Arc<dyn VideoMetadataProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Strategy for DirectMetadataStrategy {
    fn name(&self) -> &'static str {
        "direct metadata"
    }

    async fn acquire(
        &self,
        target: &VideoTarget,
        observer: &dyn ProgressObserver,
    ) -> Result<Documents> {
        let details = self.provider.fetch_details(&target.url).await?;

        observer.info(&format!("Video Title: {}", details.title));
        observer.info(&format!("Channel: {}", details.author));
        observer.warning(
            "This video doesn't have accessible captions/subtitles. Using video description for summarization instead.",
        );

        let description = details
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("No description available.");
        let content = format!(
            "Video Title: {}\n\nChannel: {}\n\nDescription: {}",
            details.title, details.author, description
        );

        Ok(Documents::single(
            ContentDocument::new(content)
                .with_metadata("title", details.title)
                .with_metadata("author", details.author)
                .with_metadata("source", target.url.as_str()),
        ))
    }
}

/// Public oEmbed endpoint.
pub struct OEmbedStrategy {
    provider: Arc<dyn OEmbedProvider>,
}

impl OEmbedStrategy {
    pub fn new(provider: Arc<dyn OEmbedProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Strategy for OEmbedStrategy {
    fn name(&self) -> &'static str {
        "oembed"
    }

    async fn acquire(
        &self,
        target: &VideoTarget,
        observer: &dyn ProgressObserver,
    ) -> Result<Documents> {
        observer.warning(
            "Unable to access video details through standard methods. Attempting to fetch video information from the oEmbed API.",
        );

        let info = self.provider.fetch_oembed(&target.url).await?;
        let title = info.title.unwrap_or_else(|| "Unknown Title".to_string());
        let author = info.author_name.unwrap_or_else(|| "Unknown Author".to_string());

        observer.info(&format!("Video Title: {}", title));
        observer.info(&format!("Channel: {}", author));

        let content = format!(
            "Video Title: {}\nChannel: {}\nVideo ID: {}\nURL: {}",
            title, author, target.video_id, target.url
        );

        Ok(Documents::single(
            ContentDocument::new(content)
                .with_metadata("title", title)
                .with_metadata("author", author)
                .with_metadata("source", target.url.as_str())
                .with_metadata("video_id", target.video_id.as_str()),
        ))
    }
}

/// Identifier-only document. Performs no I/O and never fails.
pub struct MinimalFallback;

impl MinimalFallback {
    pub fn document(target: &VideoTarget) -> ContentDocument {
        let content = format!(
            "YouTube Video ID: {}\nURL: {}\nThis is a YouTube video that requires captions or metadata for proper summarization.",
            target.video_id, target.url
        );
        ContentDocument::new(content)
            .with_metadata("source", target.url.as_str())
            .with_metadata("video_id", target.video_id.as_str())
    }
}

#[async_trait]
impl Strategy for MinimalFallback {
    fn name(&self) -> &'static str {
        "minimal"
    }

    async fn acquire(
        &self,
        target: &VideoTarget,
        observer: &dyn ProgressObserver,
    ) -> Result<Documents> {
        observer.warning("Unable to access video details. Creating minimal summary from video ID.");
        Ok(Documents::single(Self::document(target)))
    }
}

/// Ordered list of strategies with a per-strategy time limit.
pub struct VideoChain {
    strategies: Vec<Box<dyn Strategy>>,
    timeout: Duration,
}

impl VideoChain {
    pub fn new(strategies: Vec<Box<dyn Strategy>>, timeout: Duration) -> Self {
        Self {
            strategies,
            timeout,
        }
    }

    /// Transcript, then direct metadata, then oEmbed, then the minimal fallback.
    pub fn standard(
        transcripts: Arc<dyn TranscriptProvider>,
        metadata: Arc<dyn VideoMetadataProvider>,
        oembed: Arc<dyn OEmbedProvider>,
        caption_language: &str,
        timeout: Duration,
    ) -> Self {
        let strategies: Vec<Box<dyn Strategy>> = vec![
            Box::new(TranscriptStrategy::new(transcripts, caption_language)),
            Box::new(DirectMetadataStrategy::new(metadata)),
            Box::new(OEmbedStrategy::new(oembed)),
            Box::new(MinimalFallback),
        ];
        Self::new(strategies, timeout)
    }

    /// Strategy names in the order they are tried.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Acquire content for a video URL.
    ///
    /// Fails without trying any strategy when `video_id` is `None`.
    #[instrument(skip(self, observer))]
    pub async fn acquire(
        &self,
        url: &str,
        video_id: Option<&str>,
        observer: &dyn ProgressObserver,
    ) -> Result<Documents> {
        let Some(video_id) = video_id else {
            return Err(GistError::Classification(
                "Failed to load YouTube video: Failed to extract any information from this YouTube video."
                    .to_string(),
            ));
        };

        let target = VideoTarget {
            url: url.to_string(),
            video_id: video_id.to_string(),
        };

        let mut last_failure: Option<GistError> = None;

        for strategy in &self.strategies {
            debug!("Trying {} strategy", strategy.name());

            let attempt = tokio::time::timeout(self.timeout, strategy.acquire(&target, observer));
            let failure = match attempt.await {
                Ok(Ok(documents)) => {
                    info!(
                        "Acquired {} document(s) via {} strategy",
                        documents.len(),
                        strategy.name()
                    );
                    return Ok(documents);
                }
                Ok(Err(e)) => GistError::strategy(strategy.name(), e),
                Err(_) => GistError::strategy(
                    strategy.name(),
                    format!("timed out after {}s", self.timeout.as_secs()),
                ),
            };

            warn!("{}", failure);
            last_failure = Some(failure);
        }

        let cause = last_failure
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no acquisition strategies configured".to_string());
        Err(GistError::Acquisition(format!(
            "Failed to load YouTube video: {}",
            cause
        )))
    }
}
