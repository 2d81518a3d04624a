//! Extracted archive layout
//!
//! A source bundle unpacks to exactly one top-level directory named
//! `<owner>-<repo>-<revision>`. Zero or several candidates is an error;
//! ambiguity is never resolved by picking one.

use crate::error::{DeployError, DeployResult};

/// One entry at the top of an extraction directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopLevelEntry {
    pub name: String,
    pub is_dir: bool,
}

impl TopLevelEntry {
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }
}

/// Default directory-name prefix of a source bundle
pub fn archive_prefix(owner: &str, repo: &str) -> String {
    format!("{}-{}-", owner, repo)
}

/// Find the single top-level directory whose name starts with `prefix`
pub fn locate_top_level(entries: &[TopLevelEntry], prefix: &str) -> DeployResult<String> {
    let mut matches = entries
        .iter()
        .filter(|e| e.is_dir && e.name.starts_with(prefix))
        .map(|e| e.name.clone());

    let first = matches.next().ok_or_else(|| {
        DeployError::layout(format!(
            "no top-level directory starting with '{}' in the extracted archive",
            prefix
        ))
    })?;

    let rest: Vec<String> = matches.collect();
    if !rest.is_empty() {
        let mut all = vec![first];
        all.extend(rest);
        all.sort();
        return Err(DeployError::layout(format!(
            "{} top-level directories start with '{}': {}",
            all.len(),
            prefix,
            all.join(", ")
        )));
    }

    Ok(first)
}
