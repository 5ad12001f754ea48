//! CLI module for Gist.

pub mod commands;
mod output;
pub mod preflight;

pub use output::{Output, ProgressReporter};

use crate::config::ModelChoice;
use clap::{Parser, Subcommand};

/// Gist - summarize YouTube videos and web pages
///
/// Give it a URL and it hands back a summary. For videos it falls back from
/// captions to metadata to a bare video ID when content is hard to reach.
#[derive(Parser, Debug)]
#[command(name = "gist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a YouTube video or web page
    Summarize {
        /// YouTube video URL or website URL
        url: String,

        /// Model to summarize with (llama3-8b-8192, llama3-70b-8192)
        #[arg(short, long)]
        model: Option<ModelChoice>,

        /// Groq API key
        #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Load the content of a URL without summarizing it
    Fetch {
        /// YouTube video URL or website URL
        url: String,

        /// Print the documents as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_summarize_parses_model() {
        let cli = Cli::try_parse_from([
            "gist",
            "summarize",
            "https://youtu.be/dQw4w9WgXcQ",
            "--model",
            "llama3-70b-8192",
            "--api-key",
            "gsk_test",
        ])
        .unwrap();

        match cli.command {
            Commands::Summarize { url, model, api_key } => {
                assert_eq!(url, "https://youtu.be/dQw4w9WgXcQ");
                assert_eq!(model, Some(ModelChoice::Llama3_70b));
                assert_eq!(api_key.as_deref(), Some("gsk_test"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        let result = Cli::try_parse_from(["gist", "summarize", "https://example.com", "-m", "gpt-4o"]);
        assert!(result.is_err());
    }
}
