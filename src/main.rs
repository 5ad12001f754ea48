//! Gist CLI entry point.

use anyhow::Result;
use clap::Parser;
use gist::cli::{commands, Cli, Commands};
use gist::config::Settings;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.as_ref().map(PathBuf::from);
    let settings = Settings::load_from(config_path.as_ref())?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("gist={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Execute command
    match &cli.command {
        Commands::Summarize {
            url,
            model,
            api_key,
        } => {
            commands::run_summarize(url, *model, api_key.clone(), settings).await?;
        }

        Commands::Fetch { url, json } => {
            commands::run_fetch(url, *json, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, config_path)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, config_path, settings)?;
        }
    }

    Ok(())
}
