//! Command runner port - external processes

use std::path::Path;

use crate::domain::value_objects::CommandSpec;
use crate::error::DeployResult;

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Human-readable exit status ("exited with code 1")
    pub fn status_text(&self) -> String {
        match self.exit_code {
            Some(code) => format!("exited with code {}", code),
            None => "was terminated by a signal".to_string(),
        }
    }

    /// Most useful captured stream for an error message
    pub fn diagnostic(&self) -> &str {
        if self.stderr.trim().is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Runs one external command to completion
pub trait CommandRunner {
    /// Run `spec` in `cwd` with extra environment variables.
    ///
    /// Returns the captured output for any exit status; only a failure to
    /// start the process is an error.
    fn run(&self, spec: &CommandSpec, cwd: &Path, env: &[(String, String)])
        -> DeployResult<CommandOutput>;
}
