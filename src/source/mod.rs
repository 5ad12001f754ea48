//! URL classification for Gist.
//!
//! Decides whether a URL points at a YouTube video or a generic web page, and
//! pulls the video identifier out of the URL when it can.

mod youtube;

pub use youtube::{extract_video_id, is_video_url, thumbnail_url};

use crate::error::{GistError, Result};
use serde::{Deserialize, Serialize};

/// Kind of content a URL refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Video,
    Generic,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Video => write!(f, "video"),
            SourceKind::Generic => write!(f, "generic"),
        }
    }
}

/// Outcome of classifying a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: SourceKind,
    /// Video identifier. `None` for generic pages, and for video-like URLs
    /// whose identifier could not be extracted.
    pub video_id: Option<String>,
}

/// Classify an already validated URL.
pub fn classify(url: &str) -> Classification {
    if is_video_url(url) {
        Classification {
            kind: SourceKind::Video,
            video_id: extract_video_id(url),
        }
    } else {
        Classification {
            kind: SourceKind::Generic,
            video_id: None,
        }
    }
}

/// Check that a URL is well formed: an http(s) scheme and a host.
pub fn validate_url(input: &str) -> Result<url::Url> {
    let invalid = || {
        GistError::Validation(
            "Please enter a valid URL. It can be a YouTube video URL or website URL.".to_string(),
        )
    };

    let parsed = url::Url::parse(input.trim()).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid());
    }
    match parsed.host_str() {
        Some(host) if host.contains('.') || host == "localhost" => Ok(parsed),
        _ => Err(invalid()),
    }
}
