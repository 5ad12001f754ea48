//! Configuration module for Gist.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, SummaryPrompts, INSUFFICIENT_VIDEO_CONTENT, TEXT_PLACEHOLDER};
pub use settings::{
    GeneralSettings, LlmSettings, ModelChoice, PromptSettings, Settings, WebSettings,
    YoutubeSettings,
};
