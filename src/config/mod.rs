//! Configuration module for release-deployer
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (DEPLOYER_*)
//! 3. Config file (`deployer.toml` or `--config <path>`)
//! 4. Built-in defaults (lowest priority)

mod env_validator;
mod loader;
mod types;

pub use env_validator::{levenshtein, EnvVarValidator};
pub use loader::{
    load_optional, load_with_warnings, with_env_overrides, ConfigWarning, DEFAULT_CONFIG_FILE,
};
pub use types::{Config, DeployConfig, ReleaseConfig, StagingConfig};
