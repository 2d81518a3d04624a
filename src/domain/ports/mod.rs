//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod archive_extractor;
pub mod command_runner;
pub mod pipeline_events;
pub mod release_source;

pub use archive_extractor::ArchiveExtractor;
pub use command_runner::{CommandOutput, CommandRunner};
pub use pipeline_events::{NoopEventSink, PipelineEvent, PipelineEventSink};
pub use release_source::ReleaseSource;
