//! Pipeline state machine
//!
//! `Idle → Resolving → Staging → Deploying → {Succeeded | Failed}`.
//! Transitions only move forward; there is no retry loop.

use crate::error::ErrorKind;

/// Stage a failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Input validation, performed while the pipeline is still idle
    Validation,
    Resolving,
    Staging,
    Deploying,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Validation => "validation",
            Stage::Resolving => "resolving",
            Stage::Staging => "staging",
            Stage::Deploying => "deploying",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline-level state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Resolving,
    Staging,
    Deploying,
    Succeeded,
    Failed { stage: Stage, kind: ErrorKind },
}

impl PipelineState {
    fn rank(&self) -> u8 {
        match self {
            PipelineState::Idle => 0,
            PipelineState::Resolving => 1,
            PipelineState::Staging => 2,
            PipelineState::Deploying => 3,
            PipelineState::Succeeded | PipelineState::Failed { .. } => 4,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Succeeded | PipelineState::Failed { .. })
    }

    /// Whether moving from `self` to `next` is a legal forward step
    pub fn can_advance_to(&self, next: &PipelineState) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            PipelineState::Failed { .. } => true,
            PipelineState::Succeeded => matches!(self, PipelineState::Deploying),
            _ => next.rank() == self.rank() + 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PipelineState::Idle => "idle",
            PipelineState::Resolving => "resolving",
            PipelineState::Staging => "staging",
            PipelineState::Deploying => "deploying",
            PipelineState::Succeeded => "succeeded",
            PipelineState::Failed { .. } => "failed",
        }
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineState::Failed { stage, kind } => write!(f, "failed({} during {})", kind, stage),
            other => f.write_str(other.name()),
        }
    }
}
