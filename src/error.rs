//! Error types for Gist.

use thiserror::Error;

/// Library-level error type for Gist operations.
#[derive(Error, Debug)]
pub enum GistError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or malformed user input. Raised before any network call.
    #[error("{0}")]
    Validation(String),

    /// The URL looks like a video but no identifier could be extracted.
    #[error("{0}")]
    Classification(String),

    /// A single acquisition strategy failed; the chain escalates past it.
    #[error("{strategy} strategy failed: {reason}")]
    Strategy { strategy: &'static str, reason: String },

    /// Content acquisition failed for good.
    #[error("{0}")]
    Acquisition(String),

    #[error("Media source error: {0}")]
    VideoSource(String),

    #[error("Web page error: {0}")]
    WebPage(String),

    #[error("Failed to initialize LLM: {0}")]
    LlmInit(String),

    #[error("Summarization preparation failed: {0}")]
    ChainPreparation(String),

    #[error("Summarization failed: {0}")]
    Summarization(#[source] Box<GistError>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),
}

impl GistError {
    /// Build a strategy failure from any displayable cause.
    pub fn strategy(strategy: &'static str, reason: impl std::fmt::Display) -> Self {
        GistError::Strategy {
            strategy,
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for Gist operations.
pub type Result<T> = std::result::Result<T, GistError>;
