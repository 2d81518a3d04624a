//! Error types for release-deployer
//!
//! One `thiserror` enum covers every failure the pipeline can surface.
//! `ErrorKind` gives the stable taxonomy name used in reports.

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Main error type for pipeline operations
#[derive(Error, Debug)]
pub enum DeployError {
    /// A required invocation input is absent or blank
    #[error("missing required input '{input}'")]
    MissingInput { input: String },

    /// Invalid or unreadable configuration
    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    /// Network or authentication failure talking to the release service
    #[error("release service request failed: {message}")]
    Transport { message: String },

    /// No release exists for the requested tag
    #[error("release '{tag}' not found in {owner}/{repo}")]
    ReleaseNotFound {
        owner: String,
        repo: String,
        tag: String,
    },

    /// The release carries nothing deployable
    #[error("no {detail} found for release {tag}")]
    NoAsset { tag: String, detail: &'static str },

    /// Payload download failed or was cut short
    #[error("download of {url} failed: {message}")]
    Download { url: String, message: String },

    /// Extracted archive does not have the expected shape
    #[error("unexpected release layout: {message}")]
    ExtractionLayout { message: String },

    /// Deploy (or setup) command exited non-zero or could not start
    #[error("command `{command}` {status}{}", format_output(.output))]
    DeployCommand {
        command: String,
        status: String,
        exit_code: Option<i32>,
        output: String,
    },

    /// Local filesystem failure
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

fn format_output(output: &str) -> String {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

impl DeployError {
    /// Wrap an I/O error with a short description of what was attempted
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        DeployError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        DeployError::Configuration {
            message: message.into(),
        }
    }

    pub fn layout(message: impl Into<String>) -> Self {
        DeployError::ExtractionLayout {
            message: message.into(),
        }
    }

    /// Error raised when a configuration source file cannot be read
    pub fn unreadable_input(input: &str, path: &Path, source: std::io::Error) -> Self {
        DeployError::Configuration {
            message: format!("{} '{}' is not readable: {}", input, path.display(), source),
        }
    }

    /// Taxonomy name of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DeployError::MissingInput { .. } | DeployError::Configuration { .. } => {
                ErrorKind::Configuration
            }
            DeployError::Transport { .. } => ErrorKind::Transport,
            DeployError::ReleaseNotFound { .. } => ErrorKind::ReleaseNotFound,
            DeployError::NoAsset { .. } => ErrorKind::NoAsset,
            DeployError::Download { .. } => ErrorKind::Download,
            DeployError::ExtractionLayout { .. } => ErrorKind::ExtractionLayout,
            DeployError::DeployCommand { .. } => ErrorKind::DeployCommand,
            DeployError::Io { .. } => ErrorKind::Io,
        }
    }
}

/// Stable error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Transport,
    ReleaseNotFound,
    NoAsset,
    Download,
    ExtractionLayout,
    DeployCommand,
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "ConfigurationError",
            ErrorKind::Transport => "TransportError",
            ErrorKind::ReleaseNotFound => "ReleaseNotFound",
            ErrorKind::NoAsset => "NoAssetError",
            ErrorKind::Download => "DownloadError",
            ErrorKind::ExtractionLayout => "ExtractionLayoutError",
            ErrorKind::DeployCommand => "DeployCommandError",
            ErrorKind::Io => "IoError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_release_not_found() {
        let err = DeployError::ReleaseNotFound {
            owner: "acme".to_string(),
            repo: "gateway".to_string(),
            tag: "v9.9.9".to_string(),
        };
        assert_eq!(err.to_string(), "release 'v9.9.9' not found in acme/gateway");
        assert_eq!(err.kind(), ErrorKind::ReleaseNotFound);
    }

    #[test]
    fn test_error_display_no_asset() {
        let err = DeployError::NoAsset {
            tag: "v1.0.0".to_string(),
            detail: "assets",
        };
        assert_eq!(err.to_string(), "no assets found for release v1.0.0");
    }

    #[test]
    fn test_deploy_command_includes_output() {
        let err = DeployError::DeployCommand {
            command: "npx wrangler deploy".to_string(),
            status: "exited with code 1".to_string(),
            exit_code: Some(1),
            output: "auth error\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "command `npx wrangler deploy` exited with code 1: auth error"
        );
    }

    #[test]
    fn test_deploy_command_without_output() {
        let err = DeployError::DeployCommand {
            command: "true".to_string(),
            status: "was terminated by a signal".to_string(),
            exit_code: None,
            output: "  ".to_string(),
        };
        assert_eq!(err.to_string(), "command `true` was terminated by a signal");
    }

    #[test]
    fn test_missing_input_is_configuration_kind() {
        let err = DeployError::MissingInput {
            input: "versionTag".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.kind().to_string(), "ConfigurationError");
    }
}
