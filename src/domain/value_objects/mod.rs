//! Domain Value Objects
//!
//! Immutable value types that represent pipeline concepts.

mod access_token;
mod command_spec;
mod pipeline_state;
mod staging;

pub use access_token::AccessToken;
pub use command_spec::CommandSpec;
pub use pipeline_state::{PipelineState, Stage};
pub use staging::{RunLocation, StagingStrategy};
