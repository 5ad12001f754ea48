//! Pipeline orchestrator for Gist.
//!
//! Coordinates one summarization run: validate input, connect to the model,
//! load content, prepare the prompt, and generate the summary. Every step is
//! awaited before the next one starts.

use crate::acquisition::{ContentLoader, Documents};
use crate::config::{LlmSettings, ModelChoice, Prompts, Settings};
use crate::error::{GistError, Result};
use crate::progress::{Milestone, ProgressObserver};
use crate::source::validate_url;
use crate::summary::{ChatModel, LanguageModel, SummaryChain};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, instrument};

/// Builds a language model from an API key and a model choice.
pub type ModelConnector =
    Box<dyn Fn(&str, ModelChoice) -> Result<Arc<dyn LanguageModel>> + Send + Sync>;

/// What the user asked for.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    pub url: String,
    pub api_key: String,
    pub model: ModelChoice,
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    pub summary: String,
    pub documents: Documents,
    pub elapsed: Duration,
}

impl SummaryOutcome {
    /// Words of source content that went into the summary.
    pub fn word_count(&self) -> usize {
        self.documents.word_count()
    }
}

/// The main orchestrator for the Gist pipeline.
pub struct Pipeline {
    loader: ContentLoader,
    prompts: Prompts,
    connector: ModelConnector,
}

impl Pipeline {
    /// Create a pipeline with the real collaborators.
    pub fn new(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;
        let loader = ContentLoader::from_settings(settings)?;

        let llm: LlmSettings = settings.llm.clone();
        let connector: ModelConnector = Box::new(move |api_key: &str, model: ModelChoice| {
            let model: Arc<dyn LanguageModel> = Arc::new(ChatModel::connect(&llm, api_key, model)?);
            Ok(model)
        });

        Ok(Self::with_components(loader, prompts, connector))
    }

    /// Create a pipeline with custom components.
    pub fn with_components(loader: ContentLoader, prompts: Prompts, connector: ModelConnector) -> Self {
        Self {
            loader,
            prompts,
            connector,
        }
    }

    /// The content loader, for acquisition without summarization.
    pub fn loader(&self) -> &ContentLoader {
        &self.loader
    }

    /// Run a full summarization.
    #[instrument(skip(self, request, observer), fields(url = %request.url, model = %request.model))]
    pub async fn run(
        &self,
        request: &SummaryRequest,
        observer: &dyn ProgressObserver,
    ) -> Result<SummaryOutcome> {
        let url = validate_request(request)?;
        let started = Instant::now();

        observer.status("Initializing AI model...");
        let model = (self.connector)(&request.api_key, request.model).map_err(|e| match e {
            GistError::LlmInit(_) => e,
            other => GistError::LlmInit(other.to_string()),
        })?;
        observer.milestone(Milestone::ModelInitialized);

        observer.status("Loading content from URL...");
        let documents = self.loader.load(&url, observer).await?;
        observer.milestone(Milestone::ContentLoaded);

        observer.status("Preparing summarization...");
        let chain = SummaryChain::prepare(model, self.prompts.clone())?;
        observer.milestone(Milestone::ChainPrepared);

        observer.status("Generating summary...");
        let summary = chain.run(&documents).await?;
        observer.milestone(Milestone::SummaryGenerated);

        let elapsed = started.elapsed();
        info!("Summary completed in {:.2}s", elapsed.as_secs_f64());

        Ok(SummaryOutcome {
            summary,
            documents,
            elapsed,
        })
    }
}

/// Check the request before anything touches the network.
fn validate_request(request: &SummaryRequest) -> Result<String> {
    if request.api_key.trim().is_empty() || request.url.trim().is_empty() {
        return Err(GistError::Validation(
            "Please provide the information to get started".to_string(),
        ));
    }
    validate_url(&request.url)?;
    Ok(request.url.trim().to_string())
}
