//! Configuration loading and environment overrides

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::{RunLocation, StagingStrategy};
use crate::error::{DeployError, DeployResult};

use super::env_validator::{levenshtein, EnvVarValidator};
use super::types::Config;

/// Config file picked up from the current directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "deployer.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> DeployResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)
        .map_err(|e| DeployError::unreadable_input("config file", path, e))?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| {
        DeployError::configuration(format!("{}: {}", path.display(), e.to_string().trim()))
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load an explicit config file, or `deployer.toml` if it exists, or defaults.
///
/// An explicit path that does not exist is an error; a missing default file is not.
pub fn load_optional(explicit: Option<&Path>) -> DeployResult<(Config, Vec<ConfigWarning>)> {
    match explicit {
        Some(path) => load_with_warnings(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                load_with_warnings(default_path)
            } else {
                Ok((Config::default(), Vec::new()))
            }
        }
    }
}

/// Apply environment variable overrides (DEPLOYER_* prefix)
///
/// `lookup` is usually `|name| std::env::var(name).ok()`. Invalid values keep
/// the configured setting and produce a warning string.
pub fn with_env_overrides<F>(mut config: Config, lookup: F) -> (Config, Vec<String>)
where
    F: Fn(&str) -> Option<String>,
{
    let mut warnings = Vec::new();
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(owner) = get("DEPLOYER_OWNER") {
        config.release.owner = owner.trim().to_string();
    }
    if let Some(repo) = get("DEPLOYER_REPO") {
        config.release.repo = repo.trim().to_string();
    }
    if let Some(api_url) = get("DEPLOYER_API_URL") {
        config.release.api_url = api_url.trim().to_string();
    }

    if let Some(value) = get("DEPLOYER_STRATEGY") {
        let validator = EnvVarValidator::new("DEPLOYER_STRATEGY", StagingStrategy::VALID_VALUES);
        let (strategy, warning) =
            validator.parse(&value, |v| v.parse().ok(), config.staging.strategy);
        config.staging.strategy = strategy;
        warnings.extend(warning);
    }

    if let Some(value) = get("DEPLOYER_RUN_FROM") {
        let validator = EnvVarValidator::new("DEPLOYER_RUN_FROM", RunLocation::VALID_VALUES);
        let (run_from, warning) =
            validator.parse(&value, |v| v.parse().ok(), config.deploy.run_from);
        config.deploy.run_from = run_from;
        warnings.extend(warning);
    }

    if let Some(work_dir) = get("DEPLOYER_WORK_DIR") {
        config.staging.work_dir = PathBuf::from(work_dir.trim());
    }

    if let Some(value) = get("DEPLOYER_DRY_RUN") {
        let validator = EnvVarValidator::new("DEPLOYER_DRY_RUN", &["true", "false", "1", "0"]);
        let (dry_run, warning) = validator.parse(&value, parse_bool, config.deploy.dry_run);
        config.deploy.dry_run = dry_run;
        warnings.extend(warning);
    }

    if let Some(environment) = get("DEPLOYER_ENVIRONMENT") {
        config.deploy.environment = Some(environment.trim().to_string());
    }

    (config, warnings)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "release",
        "owner",
        "repo",
        "api_url",
        "token_env",
        "staging",
        "strategy",
        "work_dir",
        "source_dir",
        "archive_prefix",
        "tool_config_path",
        "app_config_path",
        "deploy",
        "run_from",
        "command",
        "program",
        "args",
        "setup",
        "dry_run",
        "environment",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}
