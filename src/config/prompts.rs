//! Prompt templates for Gist.
//!
//! The summary prompt can be customized by placing a `summary.toml` file in the
//! custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Placeholder the summary template must contain.
pub const TEXT_PLACEHOLDER: &str = "{text}";

/// Sentence the model should answer with when a video offers too little to summarize.
pub const INSUFFICIENT_VIDEO_CONTENT: &str = "This appears to be a YouTube video. To summarize this video, I would need access to its transcript or detailed description. Unfortunately, this video doesn't have accessible captions or detailed metadata that I can use for summarization.";

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub summary: SummaryPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for summary generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub template: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            template: format!(
                r#"
Provide a concise summary of the following content in 4000 words:
Content:{TEXT_PLACEHOLDER}

Focus on the main points and key information only.

If this is a YouTube video with minimal information, please respond with:
"{INSUFFICIENT_VIDEO_CONTENT}"
"#
            ),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template, replacing each `{key}` with its value.
    ///
    /// Substitution is a single pass over the template: inserted values are
    /// never scanned again, and unknown `{...}` spans are kept as written.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            result.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find(['{', '}']) {
                Some(close) if after.as_bytes()[close] == b'}' => {
                    let key = &after[..close];
                    match vars.get(key) {
                        Some(value) => result.push_str(value),
                        None => {
                            result.push('{');
                            result.push_str(key);
                            result.push('}');
                        }
                    }
                    rest = &after[close + 1..];
                }
                _ => {
                    result.push('{');
                    rest = after;
                }
            }
        }
        result.push_str(rest);
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
