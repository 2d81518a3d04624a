//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Stages
//!
//! - `ReleaseResolver` - looks up the release and picks the payload
//! - `ArtifactStager` - downloads, extracts, relocates and overlays config
//! - `DeployInvoker` - runs setup and deploy commands, then cleans up
//! - `DeployPipeline` - drives the three stages as a state machine

pub mod deploy;
pub mod invoker;
pub mod resolver;
pub mod stager;

pub use deploy::{DeployInputs, DeployPipeline, PipelineFailure, PipelineOptions, PipelineReport};
pub use invoker::{cleanup, DeployInvoker, DeployOutcome};
pub use resolver::ReleaseResolver;
pub use stager::{overlay, relocate, ArtifactStager, StagingLayout};
