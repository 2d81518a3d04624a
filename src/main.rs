//! release-deployer CLI
//!
//! Usage: release-deployer --version-tag <TAG> --config-json <FILE> --tool-config <FILE>
//!
//! Inputs also come from `INPUT_*` variables so the binary runs unchanged as
//! a GitHub Actions step.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use release_deployer::config::{load_optional, with_env_overrides, Config};
use release_deployer::domain::value_objects::{RunLocation, StagingStrategy};
use release_deployer::ui::{
    failure_json, is_github_actions, render_cleanup_warning, render_config_warnings,
    render_failure, success_json, SUCCESS_LINE,
};
use release_deployer::{
    AccessToken, DeployInputs, DeployPipeline, DeployResult, GithubReleaseSource, JsonEventSink,
    PipelineFailure, PipelineOptions, SystemCommandRunner, TracingEventSink, ZipArchiveExtractor,
};

/// Deploy a tagged release artifact with a caller-supplied configuration
#[derive(Parser, Debug)]
#[command(name = "release-deployer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Release tag to deploy
    #[arg(long, env = "INPUT_VERSIONTAG")]
    version_tag: Option<String>,

    /// Application configuration (JSON) file
    #[arg(long, env = "INPUT_CONFIGJSON")]
    config_json: Option<String>,

    /// Deployment-tool configuration file
    #[arg(long, env = "INPUT_WRANGLERTOML")]
    tool_config: Option<String>,

    /// Deployer configuration file (default: ./deployer.toml when present)
    #[arg(long, env = "DEPLOYER_CONFIG")]
    config: Option<PathBuf>,

    /// Release repository owner
    #[arg(long)]
    owner: Option<String>,

    /// Release repository name
    #[arg(long)]
    repo: Option<String>,

    /// Staging strategy (bundle, asset)
    #[arg(long)]
    strategy: Option<StagingStrategy>,

    /// Where the deploy command runs (staged-tree, work-dir)
    #[arg(long)]
    run_from: Option<RunLocation>,

    /// Directory the payload is staged into
    #[arg(long)]
    work_dir: Option<PathBuf>,

    /// Pass --dry-run to the deploy command
    #[arg(long)]
    dry_run: bool,

    /// Deployment environment passed as --env
    #[arg(long)]
    environment: Option<String>,

    /// Emit NDJSON events and a JSON outcome on stdout
    #[arg(long)]
    json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "release_deployer=info",
        1 => "release_deployer=debug",
        _ => "release_deployer=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

type Pipeline = DeployPipeline<GithubReleaseSource, ZipArchiveExtractor, SystemCommandRunner>;

fn run(cli: Cli) -> Result<ExitCode> {
    let ci = is_github_actions(|name| std::env::var(name).ok());
    let json_sink = cli.json.then(JsonEventSink::stdout);

    // Setup errors are reported like any other failed run
    let outcome = match prepare(cli) {
        Ok((pipeline, inputs)) => match &json_sink {
            Some(sink) => pipeline.run(&inputs, sink),
            None => pipeline.run(&inputs, &TracingEventSink),
        },
        Err(error) => Err(PipelineFailure::before_run(error)),
    };

    if let Some(sink) = &json_sink {
        return Ok(match outcome {
            Ok(report) => {
                sink.write_value(success_json(&report));
                ExitCode::SUCCESS
            }
            Err(failure) => {
                sink.write_value(failure_json(&failure));
                ExitCode::FAILURE
            }
        });
    }

    let mut stdout = io::stdout().lock();
    let cleanup = match &outcome {
        Ok(report) => &report.cleanup,
        Err(failure) => &failure.cleanup,
    };
    for warning in &cleanup.warnings {
        let line = render_cleanup_warning(warning, ci);
        if ci {
            writeln!(stdout, "{}", line).context("failed to write cleanup warning")?;
        } else {
            eprintln!("{}", line);
        }
    }

    let (line, code) = match outcome {
        Ok(_) => (SUCCESS_LINE.to_string(), ExitCode::SUCCESS),
        Err(failure) => (render_failure(&failure, ci), ExitCode::FAILURE),
    };
    writeln!(stdout, "{}", line).context("failed to write outcome")?;
    Ok(code)
}

/// Resolve configuration and wire the adapters into a pipeline
fn prepare(cli: Cli) -> DeployResult<(Pipeline, DeployInputs)> {
    let (config, warnings) = load_optional(cli.config.as_deref())?;
    for line in render_config_warnings(&warnings) {
        eprintln!("{}", line);
    }

    let (mut config, env_warnings) = with_env_overrides(config, |name| std::env::var(name).ok());
    for warning in env_warnings {
        eprintln!("⚠ {}", warning);
    }
    apply_cli_overrides(&mut config, &cli);
    config.validate()?;

    let token = AccessToken::new(std::env::var(&config.release.token_env).unwrap_or_default());
    if token.is_none() {
        tracing::debug!(env = %config.release.token_env, "No access token in environment");
    }

    let source = GithubReleaseSource::new(&config.release.api_url, token)?;
    let pipeline = DeployPipeline::new(
        source,
        ZipArchiveExtractor,
        SystemCommandRunner,
        PipelineOptions::from_config(&config),
    );

    let inputs = DeployInputs {
        version_tag: cli.version_tag,
        config_json: cli.config_json,
        tool_config: cli.tool_config,
    };
    Ok((pipeline, inputs))
}

fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(owner) = &cli.owner {
        config.release.owner = owner.clone();
    }
    if let Some(repo) = &cli.repo {
        config.release.repo = repo.clone();
    }
    if let Some(strategy) = cli.strategy {
        config.staging.strategy = strategy;
    }
    if let Some(run_from) = cli.run_from {
        config.deploy.run_from = run_from;
    }
    if let Some(work_dir) = &cli.work_dir {
        config.staging.work_dir = work_dir.clone();
    }
    if cli.dry_run {
        config.deploy.dry_run = true;
    }
    if let Some(environment) = &cli.environment {
        config.deploy.environment = Some(environment.clone());
    }
}
