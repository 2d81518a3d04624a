//! Deploy Module
//!
//! Runs the whole release-to-deployment pipeline.
//!
//! ## Structure
//!
//! - `options` - Inputs and configuration (`DeployInputs`, `PipelineOptions`)
//! - `result` - Terminal outcomes (`PipelineReport`, `PipelineFailure`)
//! - `use_case` - The state machine (`DeployPipeline`)
//!
//! ## Usage
//!
//! ```ignore
//! use release_deployer::application::deploy::{DeployInputs, DeployPipeline, PipelineOptions};
//!
//! let pipeline = DeployPipeline::new(source, extractor, runner, PipelineOptions::from_config(&config));
//! let report = pipeline.run(&DeployInputs::new("v1.2.0", "config.json", "wrangler.toml"), &sink)?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::{DeployInputs, PipelineOptions};
pub use result::{PipelineFailure, PipelineReport};
pub use use_case::{DeployPipeline, RELEASE_PAYLOAD_ENV, RELEASE_TAG_ENV};
