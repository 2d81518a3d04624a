//! Pipeline Event Port
//!
//! Provides an observable interface for pipeline runs.
//! Enables progress logging, JSON event streams, and test assertions.

use std::path::PathBuf;

use crate::domain::value_objects::PipelineState;

/// Event emitted during a pipeline run
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// The state machine moved forward
    StateChanged {
        from: PipelineState,
        to: PipelineState,
    },

    /// The release service returned a release
    ReleaseResolved {
        tag: String,
        asset_count: usize,
        has_bundle: bool,
    },

    /// The stager chose what to download
    PayloadSelected { name: String, url: String },

    /// Payload bytes are on disk
    PayloadDownloaded { path: PathBuf, bytes: u64 },

    /// Archive unpacked into a scratch directory
    ArchiveExtracted { archive: PathBuf, directory: PathBuf },

    /// Deployable sources moved to their well-known location
    TreeRelocated { from: PathBuf, to: PathBuf },

    /// A caller-supplied config file was copied into the tree
    ConfigOverlaid { source: PathBuf, target: PathBuf },

    /// An external command is about to start
    CommandStarted { command: String, cwd: PathBuf },

    /// An external command finished
    CommandFinished {
        command: String,
        exit_code: Option<i32>,
    },

    /// A transient artifact was removed
    ArtifactRemoved { path: PathBuf },

    /// A transient artifact could not be removed (non-fatal)
    CleanupWarning { path: PathBuf, message: String },
}

/// Trait for receiving pipeline events
///
/// Implementations can be:
/// - TracingEventSink: structured log lines
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait PipelineEventSink {
    /// Handle a pipeline event
    fn on_event(&self, event: PipelineEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl PipelineEventSink for NoopEventSink {
    fn on_event(&self, _event: PipelineEvent) {}
}
