//! Pipeline Result
//!
//! Terminal outcomes of a pipeline run.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::entities::{CleanupReport, StagedWorkspace};
use crate::domain::ports::CommandOutput;
use crate::domain::value_objects::{PipelineState, Stage};
use crate::error::DeployError;

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub tag: String,
    /// Always `Succeeded`
    pub state: PipelineState,
    pub workspace: StagedWorkspace,
    /// Captured output of the deploy command
    pub output: CommandOutput,
    pub cleanup: CleanupReport,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl PipelineReport {
    pub fn elapsed_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

/// A failed run, attributed to exactly one stage
#[derive(Debug)]
pub struct PipelineFailure {
    pub stage: Stage,
    pub error: DeployError,
    /// Cleanup still ran; its warnings never replace `error`
    pub cleanup: CleanupReport,
}

impl PipelineFailure {
    /// Failure raised while assembling the run (config, client setup).
    ///
    /// Nothing was staged yet, so there is nothing to clean up.
    pub fn before_run(error: DeployError) -> Self {
        Self {
            stage: Stage::Validation,
            error,
            cleanup: CleanupReport::default(),
        }
    }

    pub fn state(&self) -> PipelineState {
        PipelineState::Failed {
            stage: self.stage,
            kind: self.error.kind(),
        }
    }
}

impl fmt::Display for PipelineFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deployment failed: {}", self.error)
    }
}

impl std::error::Error for PipelineFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
