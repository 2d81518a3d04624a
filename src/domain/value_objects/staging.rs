//! Staging strategy and deploy location
//!
//! - `StagingStrategy`: which release payload is downloaded
//! - `RunLocation`: where the deploy command is started

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which payload of a release is staged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StagingStrategy {
    /// Source bundle (zipball) of the tagged snapshot
    #[default]
    Bundle,
    /// First binary asset attached to the release
    Asset,
}

impl StagingStrategy {
    pub const VALID_VALUES: &'static [&'static str] = &["bundle", "asset"];

    pub fn as_str(&self) -> &'static str {
        match self {
            StagingStrategy::Bundle => "bundle",
            StagingStrategy::Asset => "asset",
        }
    }
}

impl FromStr for StagingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bundle" | "zipball" => Ok(StagingStrategy::Bundle),
            "asset" => Ok(StagingStrategy::Asset),
            other => Err(format!("unknown staging strategy '{}'", other)),
        }
    }
}

impl std::fmt::Display for StagingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directory the deploy command runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RunLocation {
    /// Root of the staged tree (where the tool config is written)
    #[default]
    StagedTree,
    /// The working directory that contains the staged tree
    WorkDir,
}

impl RunLocation {
    pub const VALID_VALUES: &'static [&'static str] = &["staged-tree", "work-dir"];

    pub fn as_str(&self) -> &'static str {
        match self {
            RunLocation::StagedTree => "staged-tree",
            RunLocation::WorkDir => "work-dir",
        }
    }
}

impl FromStr for RunLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "staged-tree" | "tree" => Ok(RunLocation::StagedTree),
            "work-dir" | "root" => Ok(RunLocation::WorkDir),
            other => Err(format!("unknown run location '{}'", other)),
        }
    }
}

impl std::fmt::Display for RunLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
