//! Tracing Event Sink
//!
//! Logs pipeline events as structured `tracing` records.

use tracing::{debug, info, warn};

use crate::domain::ports::{PipelineEvent, PipelineEventSink};

/// Event sink that forwards events to the `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl PipelineEventSink for TracingEventSink {
    fn on_event(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::StateChanged { from, to } => {
                info!(from = from.name(), to = %to, "state");
            }
            PipelineEvent::ReleaseResolved {
                tag,
                asset_count,
                has_bundle,
            } => {
                info!(%tag, asset_count, has_bundle, "release resolved");
            }
            PipelineEvent::PayloadSelected { name, url } => {
                debug!(%name, %url, "payload selected");
            }
            PipelineEvent::PayloadDownloaded { path, bytes } => {
                info!(path = %path.display(), bytes, "payload downloaded");
            }
            PipelineEvent::ArchiveExtracted { archive, directory } => {
                debug!(archive = %archive.display(), directory = %directory.display(), "archive extracted");
            }
            PipelineEvent::TreeRelocated { from, to } => {
                debug!(from = %from.display(), to = %to.display(), "tree relocated");
            }
            PipelineEvent::ConfigOverlaid { source, target } => {
                info!(source = %source.display(), target = %target.display(), "config overlaid");
            }
            PipelineEvent::CommandStarted { command, cwd } => {
                debug!(%command, cwd = %cwd.display(), "command started");
            }
            PipelineEvent::CommandFinished { command, exit_code } => {
                debug!(%command, ?exit_code, "command finished");
            }
            PipelineEvent::ArtifactRemoved { path } => {
                debug!(path = %path.display(), "artifact removed");
            }
            PipelineEvent::CleanupWarning { path, message } => {
                warn!(path = %path.display(), %message, "cleanup warning");
            }
        }
    }
}
