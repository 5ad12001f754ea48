//! Progress reporting.
//!
//! The pipeline and the acquisition chain never talk to a terminal directly.
//! They report to a [`ProgressObserver`], which the CLI renders as a progress bar.

use tracing::{info, warn};

/// Fixed checkpoints of a summarization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    ModelInitialized,
    ContentLoaded,
    ChainPrepared,
    SummaryGenerated,
}

impl Milestone {
    /// Position on a 0-100 progress scale.
    pub fn percent(&self) -> u64 {
        match self {
            Milestone::ModelInitialized => 10,
            Milestone::ContentLoaded => 40,
            Milestone::ChainPrepared => 60,
            Milestone::SummaryGenerated => 100,
        }
    }
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Milestone::ModelInitialized => write!(f, "model initialized"),
            Milestone::ContentLoaded => write!(f, "content loaded"),
            Milestone::ChainPrepared => write!(f, "summarization prepared"),
            Milestone::SummaryGenerated => write!(f, "summary generated"),
        }
    }
}

/// Passive sink for progress updates.
pub trait ProgressObserver: Send + Sync {
    /// Describe the step that is about to run.
    fn status(&self, _message: &str) {}

    /// A checkpoint was reached.
    fn milestone(&self, milestone: Milestone);

    /// Something worth showing the user.
    fn info(&self, message: &str);

    /// Degraded but recoverable situation.
    fn warning(&self, message: &str);
}

/// Observer that only writes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ProgressObserver for LogObserver {
    fn milestone(&self, milestone: Milestone) {
        info!(percent = milestone.percent(), "{}", milestone);
    }

    fn info(&self, message: &str) {
        info!("{}", message);
    }

    fn warning(&self, message: &str) {
        warn!("{}", message);
    }
}
