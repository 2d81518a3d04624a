//! Deployment request - the caller-supplied inputs of one pipeline run

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{DeployError, DeployResult};

/// Input name of the version tag
pub const VERSION_TAG_INPUT: &str = "versionTag";
/// Input name of the application configuration (JSON) file
pub const CONFIG_JSON_INPUT: &str = "configJson";
/// Input name of the deployment-tool configuration file
pub const TOOL_CONFIG_INPUT: &str = "wranglerToml";

/// Validated invocation inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    version_tag: String,
    config_file: PathBuf,
    tool_config_file: PathBuf,
}

impl DeploymentRequest {
    /// Build a request from raw inputs.
    ///
    /// Absent or blank inputs fail with a configuration error naming the input.
    pub fn from_inputs(
        version_tag: Option<&str>,
        config_file: Option<&str>,
        tool_config_file: Option<&str>,
    ) -> DeployResult<Self> {
        let config_file = required(CONFIG_JSON_INPUT, config_file)?;
        let tool_config_file = required(TOOL_CONFIG_INPUT, tool_config_file)?;
        let version_tag = required(VERSION_TAG_INPUT, version_tag)?;

        Ok(Self {
            version_tag,
            config_file: PathBuf::from(config_file),
            tool_config_file: PathBuf::from(tool_config_file),
        })
    }

    pub fn version_tag(&self) -> &str {
        &self.version_tag
    }

    /// Application configuration file (overlaid at the nested config path)
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Deployment-tool configuration file (overlaid at the tree root)
    pub fn tool_config_file(&self) -> &Path {
        &self.tool_config_file
    }

    /// Check that both configuration files are readable regular files
    pub fn validate_sources(&self) -> DeployResult<()> {
        ensure_readable(CONFIG_JSON_INPUT, &self.config_file)?;
        ensure_readable(TOOL_CONFIG_INPUT, &self.tool_config_file)
    }
}

fn required(input: &str, value: Option<&str>) -> DeployResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(DeployError::MissingInput {
            input: input.to_string(),
        }),
    }
}

fn ensure_readable(input: &str, path: &Path) -> DeployResult<()> {
    let metadata =
        std::fs::metadata(path).map_err(|e| DeployError::unreadable_input(input, path, e))?;
    if !metadata.is_file() {
        return Err(DeployError::configuration(format!(
            "{} '{}' is not a regular file",
            input,
            path.display()
        )));
    }
    File::open(path).map_err(|e| DeployError::unreadable_input(input, path, e))?;
    Ok(())
}
