//! External process runner

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::info;

use crate::domain::ports::{CommandOutput, CommandRunner};
use crate::domain::value_objects::CommandSpec;
use crate::error::{DeployError, DeployResult};

/// Runs commands directly (no shell) and captures their output
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(
        &self,
        spec: &CommandSpec,
        cwd: &Path,
        env: &[(String, String)],
    ) -> DeployResult<CommandOutput> {
        let output = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(cwd)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| DeployError::DeployCommand {
                command: spec.display(),
                status: format!("could not be started in {} ({})", cwd.display(), e),
                exit_code: None,
                output: String::new(),
            })?;

        let output = CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        log_stream(&spec.program, "stdout", &output.stdout);
        log_stream(&spec.program, "stderr", &output.stderr);
        Ok(output)
    }
}

/// Tool output (e.g. the deployed URL) belongs in the default log
fn log_stream(program: &str, stream: &'static str, text: &str) {
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        info!(program, stream, "{}", line);
    }
}
