//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available
//! before starting a run that would otherwise degrade or fail midway.

use crate::config::Settings;
use crate::error::{GistError, Result};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Summarizing requires an API key.
    Summarize,
    /// Fetching has no hard requirements.
    Fetch,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, api_key: Option<&str>) -> Result<()> {
    match operation {
        Operation::Summarize => check_api_key(api_key),
        Operation::Fetch => Ok(()),
    }
}

/// Soft checks: problems that only degrade video acquisition.
pub fn advisories(settings: &Settings) -> Vec<String> {
    let mut notes = Vec::new();
    if let Err(e) = check_tool(&settings.youtube.ytdlp_path) {
        notes.push(format!(
            "{} Video captions and details are unavailable; only public metadata will be used.",
            e
        ));
    }
    notes
}

fn check_api_key(api_key: Option<&str>) -> Result<()> {
    match api_key {
        Some(key) if !key.trim().is_empty() => Ok(()),
        _ => Err(GistError::Validation(
            "Please provide the information to get started".to_string(),
        )),
    }
}

/// Check if an external tool is available.
pub(crate) fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(GistError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(GistError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(GistError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_has_no_requirements() {
        assert!(check(Operation::Fetch, None).is_ok());
    }

    #[test]
    fn test_summarize_requires_key() {
        assert!(check(Operation::Summarize, None).is_err());
        assert!(check(Operation::Summarize, Some("  ")).is_err());
        assert!(check(Operation::Summarize, Some("gsk_test")).is_ok());
    }

    #[test]
    fn test_missing_tool_is_advised() {
        let mut settings = Settings::default();
        settings.youtube.ytdlp_path = "gist-test-no-such-tool".to_string();
        let notes = advisories(&settings);
        assert_eq!(notes.len(), 1);
        assert!(notes[0].contains("gist-test-no-such-tool"));
    }
}
