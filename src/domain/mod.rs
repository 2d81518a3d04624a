//! Domain Layer
//!
//! The release pipeline's vocabulary, without network or process I/O.
//!
//! ## Structure
//!
//! - `entities/` - Pipeline values (DeploymentRequest, ReleaseDescriptor, StagedWorkspace)
//! - `value_objects/` - Small immutable types (AccessToken, StagingStrategy, PipelineState)
//! - `services/` - Pure selection and layout rules
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No network** - Release lookup, downloads and subprocesses go through ports
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - Infrastructure provides the concrete implementations

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
