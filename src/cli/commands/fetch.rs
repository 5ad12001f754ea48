//! Fetch command implementation.

use crate::acquisition::{ContentLoader, Documents};
use crate::cli::output::preview;
use crate::cli::{Output, ProgressReporter};
use crate::config::Settings;
use crate::progress::{LogObserver, ProgressObserver};
use crate::source::validate_url;
use anyhow::Result;

/// Run the fetch command.
pub async fn run_fetch(url: &str, json: bool, settings: Settings) -> Result<()> {
    validate_url(url)?;
    let loader = ContentLoader::from_settings(&settings)?;

    let documents = if json {
        loader.load(url.trim(), &LogObserver).await?
    } else {
        for note in crate::cli::preflight::advisories(&settings) {
            Output::warning(&note);
        }
        let reporter = ProgressReporter::new();
        reporter.status("Loading content from URL...");
        let result = loader.load(url.trim(), &reporter).await;
        reporter.finish();
        result?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&documents)?);
    } else {
        print_documents(&documents);
    }

    Ok(())
}

fn print_documents(documents: &Documents) {
    for (i, document) in documents.iter().enumerate() {
        Output::header(&format!("Document {}", i + 1));
        for (key, value) in document.metadata() {
            Output::kv(key, value);
        }
        Output::kv("Words", &document.word_count().to_string());
        println!("\n{}", preview(document.page_content(), 600));
    }
    println!();
    Output::success(&format!(
        "Loaded {} document(s), {} words",
        documents.len(),
        documents.word_count()
    ));
}
