//! Deploy Invoker
//!
//! Runs the deployment tool against a staged tree and removes the run's
//! transient artifacts afterwards.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::domain::entities::{CleanupReport, StagedWorkspace, TransientArtifacts};
use crate::domain::ports::{CommandOutput, CommandRunner, PipelineEvent, PipelineEventSink};
use crate::domain::value_objects::{CommandSpec, RunLocation};
use crate::error::{DeployError, DeployResult};

/// How the deploy command ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    Success(CommandOutput),
    Failure(CommandOutput),
}

impl DeployOutcome {
    fn from_output(output: CommandOutput) -> Self {
        if output.success() {
            DeployOutcome::Success(output)
        } else {
            DeployOutcome::Failure(output)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DeployOutcome::Success(_))
    }

    pub fn output(&self) -> &CommandOutput {
        match self {
            DeployOutcome::Success(output) | DeployOutcome::Failure(output) => output,
        }
    }

    /// A failure becomes a `DeployCommand` error carrying the captured output
    pub fn into_result(self, command: &CommandSpec) -> DeployResult<CommandOutput> {
        match self {
            DeployOutcome::Success(output) => Ok(output),
            DeployOutcome::Failure(output) => Err(command_error(command, output)),
        }
    }
}

/// Third stage of the pipeline
pub struct DeployInvoker<'a, CR: CommandRunner + ?Sized> {
    runner: &'a CR,
    run_from: RunLocation,
}

impl<'a, CR: CommandRunner + ?Sized> DeployInvoker<'a, CR> {
    pub fn new(runner: &'a CR, run_from: RunLocation) -> Self {
        Self { runner, run_from }
    }

    /// Directory the tool is started in
    pub fn deploy_dir<'w>(&self, workspace: &'w StagedWorkspace) -> &'w Path {
        match self.run_from {
            RunLocation::StagedTree => &workspace.root_path,
            RunLocation::WorkDir => &workspace.work_dir,
        }
    }

    /// Run the tool-setup commands in order; the first non-zero exit stops the run
    pub fn setup(
        &self,
        workspace: &StagedWorkspace,
        commands: &[CommandSpec],
        env: &[(String, String)],
        events: &dyn PipelineEventSink,
    ) -> DeployResult<()> {
        for command in commands {
            let output = self.run(command, self.deploy_dir(workspace), env, events)?;
            if !output.success() {
                return Err(command_error(command, output));
            }
        }
        Ok(())
    }

    /// Run the deploy command. Its exit status is the only success signal.
    pub fn deploy(
        &self,
        workspace: &StagedWorkspace,
        command: &CommandSpec,
        env: &[(String, String)],
        events: &dyn PipelineEventSink,
    ) -> DeployResult<DeployOutcome> {
        let output = self.run(command, self.deploy_dir(workspace), env, events)?;
        Ok(DeployOutcome::from_output(output))
    }

    fn run(
        &self,
        command: &CommandSpec,
        cwd: &Path,
        env: &[(String, String)],
        events: &dyn PipelineEventSink,
    ) -> DeployResult<CommandOutput> {
        let rendered = command.display();
        info!(command = %rendered, cwd = %cwd.display(), "Running command");
        events.on_event(PipelineEvent::CommandStarted {
            command: rendered.clone(),
            cwd: cwd.to_path_buf(),
        });

        let output = self.runner.run(command, cwd, env)?;

        debug!(command = %rendered, exit_code = ?output.exit_code, "Command finished");
        events.on_event(PipelineEvent::CommandFinished {
            command: rendered,
            exit_code: output.exit_code,
        });
        Ok(output)
    }
}

fn command_error(command: &CommandSpec, output: CommandOutput) -> DeployError {
    DeployError::DeployCommand {
        command: command.display(),
        status: output.status_text(),
        exit_code: output.exit_code,
        output: output.diagnostic().to_string(),
    }
}

/// Remove every transient artifact of the run.
///
/// Never fails: problems are logged and returned as warnings.
pub fn cleanup(artifacts: TransientArtifacts, events: &dyn PipelineEventSink) -> CleanupReport {
    let report = artifacts.release();
    for path in &report.removed {
        debug!(path = %path.display(), "Removed transient artifact");
        events.on_event(PipelineEvent::ArtifactRemoved { path: path.clone() });
    }
    for warning in &report.warnings {
        warn!(path = %warning.path.display(), "{}", warning.message);
        events.on_event(PipelineEvent::CleanupWarning {
            path: warning.path.clone(),
            message: warning.message.clone(),
        });
    }
    report
}
