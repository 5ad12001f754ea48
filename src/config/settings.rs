//! Configuration settings for Gist.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub llm: LlmSettings,
    pub youtube: YoutubeSettings,
    pub web: WebSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Summarization model. The service only exposes a fixed set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum ModelChoice {
    /// Smaller and faster, listed first.
    #[default]
    #[serde(rename = "llama3-8b-8192")]
    Llama3_8b,
    #[serde(rename = "llama3-70b-8192")]
    Llama3_70b,
}

impl ModelChoice {
    /// All selectable models, fastest first.
    pub const ALL: [ModelChoice; 2] = [ModelChoice::Llama3_8b, ModelChoice::Llama3_70b];

    /// Model name as sent to the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelChoice::Llama3_8b => "llama3-8b-8192",
            ModelChoice::Llama3_70b => "llama3-70b-8192",
        }
    }
}

impl std::str::FromStr for ModelChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelChoice::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<&str> = ModelChoice::ALL.iter().map(|m| m.as_str()).collect();
                format!("Unknown model: {} (expected one of: {})", s, known.join(", "))
            })
    }
}

impl std::fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// LLM service settings. Any OpenAI-compatible endpoint works.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Base URL of the chat completions API.
    pub api_base: String,
    /// API key. Usually left unset in favor of GROQ_API_KEY or --api-key.
    pub api_key: Option<String>,
    /// Default model.
    pub model: ModelChoice,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.groq.com/openai/v1".to_string(),
            api_key: None,
            model: ModelChoice::default(),
            temperature: 0.3,
            timeout_secs: crate::openai::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// YouTube acquisition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// Caption language requested from the transcript provider.
    pub caption_language: String,
    /// Upper bound for each acquisition strategy, in seconds.
    pub strategy_timeout_secs: u64,
    /// oEmbed endpoint queried by the public metadata strategy.
    pub oembed_endpoint: String,
    /// yt-dlp executable.
    pub ytdlp_path: String,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            caption_language: "en".to_string(),
            strategy_timeout_secs: 20,
            oembed_endpoint: "https://www.youtube.com/oembed".to_string(),
            ytdlp_path: "yt-dlp".to_string(),
        }
    }
}

/// Generic web page fetching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebSettings {
    /// Browser-like User-Agent, avoids naive bot blocking.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum characters of page text kept per document.
    pub max_chars: usize,
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36".to_string(),
            timeout_secs: 30,
            max_chars: 200_000,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {variable_name}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::GistError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gist")
            .join("config.toml")
    }

    /// API key from the config file, falling back to GROQ_API_KEY.
    pub fn api_key(&self) -> Option<String> {
        self.llm
            .api_key
            .clone()
            .or_else(|| std::env::var("GROQ_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_choice_parse() {
        assert_eq!("llama3-8b-8192".parse::<ModelChoice>(), Ok(ModelChoice::Llama3_8b));
        assert_eq!("LLAMA3-70B-8192".parse::<ModelChoice>(), Ok(ModelChoice::Llama3_70b));
        assert!("gpt-4o".parse::<ModelChoice>().is_err());
        assert_eq!(ModelChoice::default().to_string(), "llama3-8b-8192");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [llm]
            model = "llama3-70b-8192"

            [youtube]
            caption_language = "de"
            "#,
        )
        .unwrap();

        assert_eq!(settings.llm.model, ModelChoice::Llama3_70b);
        assert_eq!(settings.llm.api_base, "https://api.groq.com/openai/v1");
        assert_eq!(settings.youtube.caption_language, "de");
        assert_eq!(settings.youtube.strategy_timeout_secs, 20);
        assert!(settings.web.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.youtube.strategy_timeout_secs = 5;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.youtube.strategy_timeout_secs, 5);
        assert_eq!(loaded.llm.model, ModelChoice::Llama3_8b);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.youtube.caption_language, "en");
    }
}
