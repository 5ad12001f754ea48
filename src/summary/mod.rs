//! Summary generation.
//!
//! All acquired documents are stuffed into a single prompt and sent to the
//! language model in one request.

mod llm;

pub use llm::ChatModel;

use crate::acquisition::Documents;
use crate::config::{Prompts, TEXT_PLACEHOLDER};
use crate::error::{GistError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A model that completes a prompt.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Model name, for display.
    fn name(&self) -> &str;

    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Prompt template bound to a model.
pub struct SummaryChain {
    model: Arc<dyn LanguageModel>,
    prompts: Prompts,
}

impl SummaryChain {
    /// Check the template and bind it to the model.
    pub fn prepare(model: Arc<dyn LanguageModel>, prompts: Prompts) -> Result<Self> {
        let occurrences = prompts.summary.template.matches(TEXT_PLACEHOLDER).count();
        if occurrences != 1 {
            return Err(GistError::ChainPreparation(format!(
                "prompt template must contain exactly one {} placeholder, found {}",
                TEXT_PLACEHOLDER, occurrences
            )));
        }
        Ok(Self { model, prompts })
    }

    /// Prompt that would be sent for these documents.
    pub fn render(&self, documents: &Documents) -> String {
        let mut vars = HashMap::new();
        vars.insert("text".to_string(), documents.combined_text());
        self.prompts
            .render_with_custom(&self.prompts.summary.template, &vars)
    }

    /// Summarize the documents.
    #[instrument(skip(self, documents), fields(model = %self.model.name(), documents = documents.len()))]
    pub async fn run(&self, documents: &Documents) -> Result<String> {
        let prompt = self.render(documents);
        debug!("Prompt is {} characters", prompt.len());

        let summary = self
            .model
            .complete(&prompt)
            .await
            .map_err(|e| GistError::Summarization(Box::new(e)))?;

        if summary.trim().is_empty() {
            return Err(GistError::Summarization(Box::new(GistError::OpenAI(
                "Empty response from LLM".to_string(),
            ))));
        }
        Ok(summary)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedModel;
    use super::*;
    use crate::acquisition::ContentDocument;

    fn documents() -> Documents {
        Documents::new(vec![
            ContentDocument::new("First part."),
            ContentDocument::new("Second part."),
        ])
        .unwrap()
    }

    #[test]
    fn test_prepare_rejects_template_without_placeholder() {
        let mut prompts = Prompts::default();
        prompts.summary.template = "Summarize this.".to_string();

        let err = SummaryChain::prepare(Arc::new(ScriptedModel::replying("x")), prompts)
            .err()
            .unwrap();
        assert!(err.to_string().starts_with("Summarization preparation failed"));
    }

    #[test]
    fn test_render_stuffs_all_documents() {
        let mut prompts = Prompts::default();
        prompts.summary.template = "Summary please:\n{text}\nEnd.".to_string();
        let chain = SummaryChain::prepare(Arc::new(ScriptedModel::replying("x")), prompts).unwrap();

        assert_eq!(
            chain.render(&documents()),
            "Summary please:\nFirst part.\n\nSecond part.\nEnd."
        );
    }

    #[test]
    fn test_render_leaves_document_placeholders_alone() {
        let mut prompts = Prompts::default();
        prompts.summary.template = "Write in a {tone} voice.\n{text}".to_string();
        prompts.variables.insert("tone".to_string(), "formal".to_string());
        let chain = SummaryChain::prepare(Arc::new(ScriptedModel::replying("x")), prompts).unwrap();

        let documents = Documents::single(ContentDocument::new("format!(\"{tone}\")"));
        for _ in 0..50 {
            assert_eq!(
                chain.render(&documents),
                "Write in a formal voice.\nformat!(\"{tone}\")"
            );
        }
    }

    #[tokio::test]
    async fn test_run_sends_one_prompt() {
        let model = Arc::new(ScriptedModel::replying("A short summary."));
        let chain = SummaryChain::prepare(model.clone(), Prompts::default()).unwrap();

        let summary = chain.run(&documents()).await.unwrap();
        assert_eq!(summary, "A short summary.");

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Content:First part.\n\nSecond part."));
    }

    #[tokio::test]
    async fn test_run_wraps_model_errors() {
        let chain =
            SummaryChain::prepare(Arc::new(ScriptedModel::failing("rate limited")), Prompts::default())
                .unwrap();

        let err = chain.run(&documents()).await.unwrap_err();
        assert!(matches!(err, GistError::Summarization(_)));
        assert_eq!(err.to_string(), "Summarization failed: OpenAI API error: rate limited");
    }
}
