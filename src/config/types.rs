//! Configuration type definitions

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::services::archive_prefix;
use crate::domain::value_objects::{CommandSpec, RunLocation, StagingStrategy};
use crate::error::{DeployError, DeployResult};

use super::loader;

/// Where releases come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Owner (user or organization) of the released project
    pub owner: String,
    /// Repository name of the released project
    pub repo: String,
    /// Base URL of the release-hosting API
    pub api_url: String,
    /// Environment variable holding the access credential
    pub token_env: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            owner: "irensaltali".to_string(),
            repo: "serverlessapigateway".to_string(),
            api_url: "https://api.github.com".to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
        }
    }
}

/// How the payload is turned into a staged tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagingConfig {
    pub strategy: StagingStrategy,
    /// Directory the pipeline owns for this run
    pub work_dir: PathBuf,
    /// Sub-directory of the extracted tree that holds the deployable sources.
    /// Empty means the whole top-level directory.
    pub source_dir: String,
    /// Top-level directory prefix of the extracted archive (default `<owner>-<repo>-`)
    pub archive_prefix: Option<String>,
    /// Target of the deployment-tool config, relative to the staged tree
    pub tool_config_path: PathBuf,
    /// Target of the application config, relative to the staged tree
    pub app_config_path: PathBuf,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            strategy: StagingStrategy::default(),
            work_dir: PathBuf::from("."),
            source_dir: "worker".to_string(),
            archive_prefix: None,
            tool_config_path: PathBuf::from("wrangler.toml"),
            app_config_path: PathBuf::from("src/api-config.json"),
        }
    }
}

impl StagingConfig {
    /// Prefix used to locate the extracted top-level directory
    pub fn archive_prefix_for(&self, owner: &str, repo: &str) -> String {
        match &self.archive_prefix {
            Some(prefix) if !prefix.is_empty() => prefix.clone(),
            _ => archive_prefix(owner, repo),
        }
    }
}

/// How the deployment tool is invoked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    pub run_from: RunLocation,
    pub command: CommandSpec,
    /// Commands run before the deploy command (tool install, version probe)
    pub setup: Vec<CommandSpec>,
    /// Append `--dry-run` to the deploy command
    pub dry_run: bool,
    /// Append `--env <name>` to the deploy command
    pub environment: Option<String>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            run_from: RunLocation::default(),
            command: CommandSpec::new("npx", ["wrangler", "deploy"]),
            setup: vec![
                CommandSpec::new("npm", ["install", "wrangler", "--save-dev"]),
                CommandSpec::new("npx", ["wrangler", "--version"]),
            ],
            dry_run: false,
            environment: None,
        }
    }
}

impl DeployConfig {
    /// The deploy command with environment-specific flags applied
    pub fn deploy_command(&self) -> CommandSpec {
        let mut flags: Vec<String> = Vec::new();
        if self.dry_run {
            flags.push("--dry-run".to_string());
        }
        if let Some(env) = self.environment.as_deref().filter(|e| !e.trim().is_empty()) {
            flags.push("--env".to_string());
            flags.push(env.trim().to_string());
        }
        self.command.with_args(flags)
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub staging: StagingConfig,

    #[serde(default)]
    pub deploy: DeployConfig,
}

impl Config {
    /// Load configuration from a TOML file, ignoring unknown-key warnings
    pub fn load(path: &Path) -> DeployResult<Self> {
        loader::load_with_warnings(path).map(|(config, _)| config)
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> DeployResult<()> {
        if self.release.owner.trim().is_empty() || self.release.repo.trim().is_empty() {
            return Err(DeployError::configuration(
                "release.owner and release.repo must be set",
            ));
        }
        if self.release.api_url.trim().is_empty() {
            return Err(DeployError::configuration("release.api_url must be set"));
        }
        if self.deploy.command.program.trim().is_empty() {
            return Err(DeployError::configuration(
                "deploy.command.program must be set",
            ));
        }
        if let Some(setup) = self.deploy.setup.iter().find(|c| c.program.trim().is_empty()) {
            return Err(DeployError::configuration(format!(
                "deploy.setup entry with arguments {:?} has no program",
                setup.args
            )));
        }
        ensure_contained("staging.tool_config_path", &self.staging.tool_config_path)?;
        ensure_contained("staging.app_config_path", &self.staging.app_config_path)?;
        ensure_contained("staging.source_dir", Path::new(&self.staging.source_dir))?;
        Ok(())
    }
}

/// Overlay targets and the source dir must stay inside the staged tree
fn ensure_contained(key: &str, path: &Path) -> DeployResult<()> {
    let escapes = path.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(DeployError::configuration(format!(
            "{} '{}' must be a relative path inside the staged tree",
            key,
            path.display()
        )));
    }
    Ok(())
}
