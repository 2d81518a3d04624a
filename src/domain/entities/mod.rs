//! Domain Entities
//!
//! Process-lifetime values produced and consumed by the pipeline stages.
//! - `DeploymentRequest` - validated caller inputs
//! - `ReleaseDescriptor` - a release as reported by the release service
//! - `StagedWorkspace` - the prepared tree handed to the deploy tool
//! - `TransientArtifacts` - scoped ownership of downloads and extraction dirs

mod release;
mod request;
mod workspace;

pub use release::{AssetRef, PayloadKind, PayloadRef, ReleaseDescriptor, ResolvedRelease};
pub use request::{
    DeploymentRequest, CONFIG_JSON_INPUT, TOOL_CONFIG_INPUT, VERSION_TAG_INPUT,
};
pub use workspace::{CleanupReport, CleanupWarning, StagedWorkspace, TransientArtifacts};
