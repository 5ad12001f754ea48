//! Chat-completion backed language model.

use super::LanguageModel;
use crate::config::{LlmSettings, ModelChoice};
use crate::error::{GistError, Result};
use crate::openai::create_client_with_timeout;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// A model behind an OpenAI-compatible chat completions API.
pub struct ChatModel {
    client: Client<OpenAIConfig>,
    model: ModelChoice,
    temperature: f32,
}

impl ChatModel {
    /// Connect to the configured API with the given key.
    pub fn connect(settings: &LlmSettings, api_key: &str, model: ModelChoice) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(GistError::LlmInit("API key is empty".to_string()));
        }

        let client = create_client_with_timeout(
            &settings.api_base,
            api_key.trim(),
            Duration::from_secs(settings.timeout_secs),
        )?;

        Ok(Self {
            client,
            model,
            temperature: settings.temperature,
        })
    }
}

#[async_trait]
impl LanguageModel for ChatModel {
    fn name(&self) -> &str {
        self.model.as_str()
    }

    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| GistError::OpenAI(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| GistError::OpenAI(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| GistError::OpenAI(format!("Failed to generate response: {}", e)))?;

        if let Some(usage) = &response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion usage"
            );
        }

        response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| GistError::OpenAI("Empty response from LLM".to_string()))
    }
}
