//! release-deployer - deploy a tagged release artifact
//!
//! Resolves a release by tag, stages its payload into a working tree with
//! caller-supplied configuration overlaid, then runs the deployment tool
//! against that tree. Transient downloads are removed on every outcome.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;

// Re-exports for convenience
pub use application::{DeployInputs, DeployPipeline, PipelineFailure, PipelineOptions, PipelineReport};
pub use config::{Config, ConfigWarning};
pub use domain::value_objects::{AccessToken, PipelineState, RunLocation, Stage, StagingStrategy};
pub use error::{DeployError, DeployResult, ErrorKind};
pub use infrastructure::{
    GithubReleaseSource, JsonEventSink, SystemCommandRunner, TracingEventSink, ZipArchiveExtractor,
};
