//! Deploy Pipeline
//!
//! Drives one run through `Idle → Resolving → Staging → Deploying` and ends in
//! `Succeeded` or `Failed`. Each stage's output is the next stage's only input.
//! Cleanup of transient artifacts runs after the last stage that was reached,
//! whatever the outcome.

use chrono::Utc;
use tracing::{debug, info};

use crate::application::invoker::{cleanup, DeployInvoker};
use crate::application::resolver::ReleaseResolver;
use crate::application::stager::ArtifactStager;
use crate::domain::entities::{
    DeploymentRequest, ResolvedRelease, StagedWorkspace, TransientArtifacts,
};
use crate::domain::ports::{
    ArchiveExtractor, CommandOutput, CommandRunner, PipelineEvent, PipelineEventSink,
    ReleaseSource,
};
use crate::domain::value_objects::{PipelineState, Stage};
use crate::error::DeployError;

use super::options::{DeployInputs, PipelineOptions};
use super::result::{PipelineFailure, PipelineReport};

/// Environment variable carrying the resolved tag to the deploy command
pub const RELEASE_TAG_ENV: &str = "RELEASE_TAG";
/// Environment variable carrying the downloaded payload when it was not extracted
pub const RELEASE_PAYLOAD_ENV: &str = "RELEASE_PAYLOAD";

/// Deploy pipeline - orchestrates resolver, stager and invoker
///
/// Parameterized by its ports so tests can swap in fakes.
pub struct DeployPipeline<RS, AE, CR>
where
    RS: ReleaseSource,
    AE: ArchiveExtractor,
    CR: CommandRunner,
{
    source: RS,
    extractor: AE,
    runner: CR,
    options: PipelineOptions,
}

/// Tracks the current state and reports every transition
struct StateMachine<'e> {
    state: PipelineState,
    events: &'e dyn PipelineEventSink,
}

impl<'e> StateMachine<'e> {
    fn new(events: &'e dyn PipelineEventSink) -> Self {
        Self {
            state: PipelineState::Idle,
            events,
        }
    }

    fn advance(&mut self, next: PipelineState) {
        debug_assert!(
            self.state.can_advance_to(&next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        debug!(from = %self.state, to = %next, "Pipeline state changed");
        self.events.on_event(PipelineEvent::StateChanged {
            from: self.state,
            to: next,
        });
        self.state = next;
    }
}

/// What the stages hand back on success
struct Completed {
    tag: String,
    workspace: StagedWorkspace,
    output: CommandOutput,
}

type StageResult<T> = Result<T, (Stage, DeployError)>;

fn at(stage: Stage) -> impl FnOnce(DeployError) -> (Stage, DeployError) {
    move |error| (stage, error)
}

impl<RS, AE, CR> DeployPipeline<RS, AE, CR>
where
    RS: ReleaseSource,
    AE: ArchiveExtractor,
    CR: CommandRunner,
{
    pub fn new(source: RS, extractor: AE, runner: CR, options: PipelineOptions) -> Self {
        Self {
            source,
            extractor,
            runner,
            options,
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Execute one run, reporting progress to `events`
    pub fn run(
        &self,
        inputs: &DeployInputs,
        events: &dyn PipelineEventSink,
    ) -> Result<PipelineReport, PipelineFailure> {
        let started_at = Utc::now();
        let mut machine = StateMachine::new(events);
        let mut artifacts = TransientArtifacts::new();

        let result = self.drive(inputs, &mut machine, &mut artifacts, events);
        let cleanup_report = cleanup(artifacts, events);

        match result {
            Ok(completed) => {
                machine.advance(PipelineState::Succeeded);
                info!(tag = %completed.tag, "Deployment succeeded");
                Ok(PipelineReport {
                    tag: completed.tag,
                    state: machine.state,
                    workspace: completed.workspace,
                    output: completed.output,
                    cleanup: cleanup_report,
                    started_at,
                    finished_at: Utc::now(),
                })
            }
            Err((stage, error)) => {
                machine.advance(PipelineState::Failed {
                    stage,
                    kind: error.kind(),
                });
                Err(PipelineFailure {
                    stage,
                    error,
                    cleanup: cleanup_report,
                })
            }
        }
    }

    fn drive(
        &self,
        inputs: &DeployInputs,
        machine: &mut StateMachine<'_>,
        artifacts: &mut TransientArtifacts,
        events: &dyn PipelineEventSink,
    ) -> StageResult<Completed> {
        let request = validate(inputs).map_err(at(Stage::Validation))?;

        machine.advance(PipelineState::Resolving);
        let release = ReleaseResolver::new(&self.source, self.options.strategy)
            .resolve(&self.options.owner, &self.options.repo, request.version_tag())
            .map_err(at(Stage::Resolving))?;
        events.on_event(PipelineEvent::ReleaseResolved {
            tag: release.tag().to_string(),
            asset_count: release.descriptor.assets.len(),
            has_bundle: release.descriptor.bundle_url.is_some(),
        });

        machine.advance(PipelineState::Staging);
        let workspace = ArtifactStager::new(&self.source, &self.extractor, &self.options.layout)
            .stage(&release, &request, artifacts, events)
            .map_err(at(Stage::Staging))?;

        machine.advance(PipelineState::Deploying);
        let output = self
            .deploy(&release, &workspace, events)
            .map_err(at(Stage::Deploying))?;

        Ok(Completed {
            tag: release.tag().to_string(),
            workspace,
            output,
        })
    }

    fn deploy(
        &self,
        release: &ResolvedRelease,
        workspace: &StagedWorkspace,
        events: &dyn PipelineEventSink,
    ) -> Result<CommandOutput, DeployError> {
        let invoker = DeployInvoker::new(&self.runner, self.options.run_from);
        let env = deploy_env(release, workspace);

        invoker.setup(workspace, &self.options.setup, &env, events)?;
        invoker
            .deploy(workspace, &self.options.command, &env, events)?
            .into_result(&self.options.command)
    }
}

/// Inputs must be present and both files readable before anything else happens
fn validate(inputs: &DeployInputs) -> Result<DeploymentRequest, DeployError> {
    let request = DeploymentRequest::from_inputs(
        inputs.version_tag.as_deref(),
        inputs.config_json.as_deref(),
        inputs.tool_config.as_deref(),
    )?;
    request.validate_sources()?;
    Ok(request)
}

fn deploy_env(release: &ResolvedRelease, workspace: &StagedWorkspace) -> Vec<(String, String)> {
    let mut env = vec![(RELEASE_TAG_ENV.to_string(), release.tag().to_string())];
    if let Some(payload) = &workspace.payload_path {
        env.push((
            RELEASE_PAYLOAD_ENV.to_string(),
            payload.to_string_lossy().into_owned(),
        ));
    }
    env
}
