//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `github/` - Release service client (`ReleaseSource`)
//! - `archive` - Zip extraction (`ArchiveExtractor`)
//! - `process` - Subprocess execution (`CommandRunner`)
//! - `events/` - Event sinks (tracing, NDJSON)

pub mod archive;
pub mod events;
pub mod github;
pub mod process;

// Re-export for convenience
pub use archive::ZipArchiveExtractor;
pub use events::{JsonEventSink, TracingEventSink};
pub use github::GithubReleaseSource;
pub use process::SystemCommandRunner;
