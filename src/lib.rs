//! Gist - Summaries of YouTube videos and web pages
//!
//! A CLI tool and library that turns a URL into a short summary using a
//! hosted language model.
//!
//! # Overview
//!
//! Gist allows you to:
//! - Summarize any web page from its main text
//! - Summarize YouTube videos, even when captions or details are unavailable
//! - Inspect exactly what content was acquired before it is summarized
//!
//! Video content is acquired through a chain of strategies tried in order:
//! captions, direct video details, public oEmbed metadata, and finally a
//! minimal document built from the video ID alone.
//!
//! # Architecture
//!
//! - `config` - Configuration and prompt templates
//! - `source` - URL validation and classification
//! - `acquisition` - Content loading and the video fallback chain
//! - `summary` - Prompt rendering and the language model
//! - `progress` - Progress reporting
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use gist::config::Settings;
//! use gist::orchestrator::{Pipeline, SummaryRequest};
//! use gist::progress::LogObserver;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(&settings)?;
//!
//!     let request = SummaryRequest {
//!         url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
//!         api_key: std::env::var("GROQ_API_KEY")?,
//!         model: settings.llm.model,
//!     };
//!     let outcome = pipeline.run(&request, &LogObserver).await?;
//!     println!("{}", outcome.summary);
//!
//!     Ok(())
//! }
//! ```

pub mod acquisition;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod progress;
pub mod source;
pub mod summary;

pub use error::{GistError, Result};
