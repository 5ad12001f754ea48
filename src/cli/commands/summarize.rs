//! Summarize command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::{Output, ProgressReporter};
use crate::config::{ModelChoice, Settings};
use crate::error::GistError;
use crate::orchestrator::{Pipeline, SummaryRequest};
use anyhow::Result;
use console::style;

/// Run the summarize command.
pub async fn run_summarize(
    url: &str,
    model: Option<ModelChoice>,
    api_key: Option<String>,
    settings: Settings,
) -> Result<()> {
    let api_key = api_key
        .filter(|k| !k.trim().is_empty())
        .or_else(|| settings.api_key());

    if let Err(e) = preflight::check(Operation::Summarize, api_key.as_deref()) {
        Output::error(&format!("{}", e));
        Output::info("Pass --api-key or set GROQ_API_KEY. Run 'gist doctor' for diagnostics.");
        return Err(e.into());
    }
    for note in preflight::advisories(&settings) {
        Output::warning(&note);
    }

    let request = SummaryRequest {
        url: url.to_string(),
        api_key: api_key.unwrap_or_default(),
        model: model.unwrap_or(settings.llm.model),
    };

    let pipeline = Pipeline::new(&settings)?;
    let reporter = ProgressReporter::new();

    match pipeline.run(&request, &reporter).await {
        Ok(outcome) => {
            reporter.finish();

            Output::header("Summary");
            println!("\n{}\n", outcome.summary);
            Output::kv("Model", request.model.as_str());
            Output::kv("Source words", &outcome.word_count().to_string());
            Output::success(&format!(
                "Summary completed in {:.2} seconds",
                outcome.elapsed.as_secs_f64()
            ));
            Ok(())
        }
        Err(e) => {
            reporter.finish();
            Output::error(&e.to_string());
            if matches!(e, GistError::Summarization(_)) {
                print_diagnostics(&e);
            }
            Err(e.into())
        }
    }
}

/// Full cause chain for failures during generation.
fn print_diagnostics(error: &GistError) {
    eprintln!("{}", style("Diagnostics:").dim());
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  {} {}", style("caused by:").dim(), cause);
        source = cause.source();
    }
}
