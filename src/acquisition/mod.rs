//! Content acquisition for Gist.
//!
//! Routes a URL to the video chain or to the generic page fetcher and returns
//! the documents the summarizer works on.

mod chain;
mod document;
mod oembed;
mod providers;
mod web;
mod ytdlp;

#[cfg(test)]
pub(crate) mod testing;

pub use chain::{
    DirectMetadataStrategy, MinimalFallback, OEmbedStrategy, Strategy, TranscriptStrategy,
    VideoChain, VideoTarget,
};
pub use document::{ContentDocument, Documents};
pub use oembed::HttpOEmbedProvider;
pub use providers::{
    OEmbedInfo, OEmbedProvider, PageFetcher, Transcript, TranscriptProvider, VideoDetails,
    VideoMetadataProvider,
};
pub use web::{parse_html, WebPageFetcher};
pub use ytdlp::{vtt_to_text, YtDlp};

use crate::config::Settings;
use crate::error::{GistError, Result};
use crate::progress::ProgressObserver;
use crate::source::{classify, thumbnail_url, SourceKind};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Entry point for turning a URL into documents.
pub struct ContentLoader {
    video: VideoChain,
    pages: Arc<dyn PageFetcher>,
}

impl ContentLoader {
    pub fn new(video: VideoChain, pages: Arc<dyn PageFetcher>) -> Self {
        Self { video, pages }
    }

    /// Build the loader with the real collaborators.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.youtube.strategy_timeout_secs);
        let ytdlp = Arc::new(YtDlp::new(settings.youtube.ytdlp_path.clone(), timeout));
        let oembed = Arc::new(HttpOEmbedProvider::new(&settings.youtube.oembed_endpoint, timeout)?);

        let video = VideoChain::standard(
            ytdlp.clone(),
            ytdlp,
            oembed,
            &settings.youtube.caption_language,
            timeout,
        );
        debug!("Video strategies: {}", video.strategy_names().join(" -> "));
        let pages = Arc::new(WebPageFetcher::new(&settings.web)?);

        Ok(Self::new(video, pages))
    }

    /// Load documents for a validated URL.
    #[instrument(skip(self, observer))]
    pub async fn load(&self, url: &str, observer: &dyn ProgressObserver) -> Result<Documents> {
        let classification = classify(url);
        info!("Classified as {}", classification.kind);

        match classification.kind {
            SourceKind::Video => {
                if let Some(id) = &classification.video_id {
                    observer.info(&format!("Thumbnail: {}", thumbnail_url(id)));
                }
                self.video
                    .acquire(url, classification.video_id.as_deref(), observer)
                    .await
            }
            SourceKind::Generic => self.load_page(url, observer).await,
        }
    }

    async fn load_page(&self, url: &str, observer: &dyn ProgressObserver) -> Result<Documents> {
        let documents = self
            .pages
            .fetch_page(url)
            .await
            .and_then(Documents::new)
            .map_err(|e| GistError::Acquisition(format!("Failed to initialize URL loader: {}", e)))?;

        observer.info(&format!("Web Page Content: {} words", documents.word_count()));
        Ok(documents)
    }
}
