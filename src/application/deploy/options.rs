//! Pipeline Options
//!
//! Configuration and raw inputs of one pipeline run.

use crate::application::stager::StagingLayout;
use crate::config::Config;
use crate::domain::value_objects::{CommandSpec, RunLocation, StagingStrategy};

/// Invocation inputs as supplied by the caller (validated by the pipeline)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployInputs {
    pub version_tag: Option<String>,
    /// Application configuration (JSON) file
    pub config_json: Option<String>,
    /// Deployment-tool configuration file
    pub tool_config: Option<String>,
}

impl DeployInputs {
    pub fn new(
        version_tag: impl Into<String>,
        config_json: impl Into<String>,
        tool_config: impl Into<String>,
    ) -> Self {
        Self {
            version_tag: Some(version_tag.into()),
            config_json: Some(config_json.into()),
            tool_config: Some(tool_config.into()),
        }
    }
}

/// Options for the deploy pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub owner: String,
    pub repo: String,
    pub strategy: StagingStrategy,
    pub layout: StagingLayout,
    pub run_from: RunLocation,
    /// Commands run before the deploy command
    pub setup: Vec<CommandSpec>,
    /// Deploy command with dry-run/environment flags applied
    pub command: CommandSpec,
}

impl PipelineOptions {
    pub fn from_config(config: &Config) -> Self {
        let release = &config.release;
        let staging = &config.staging;
        Self {
            owner: release.owner.clone(),
            repo: release.repo.clone(),
            strategy: staging.strategy,
            layout: StagingLayout {
                work_dir: staging.work_dir.clone(),
                source_dir: staging.source_dir.trim_matches('/').to_string(),
                archive_prefix: staging.archive_prefix_for(&release.owner, &release.repo),
                tool_config_path: staging.tool_config_path.clone(),
                app_config_path: staging.app_config_path.clone(),
            },
            run_from: config.deploy.run_from,
            setup: config.deploy.setup.clone(),
            command: config.deploy.deploy_command(),
        }
    }
}
