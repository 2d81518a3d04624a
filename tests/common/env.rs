//! Test environment builder for isolated CLI runs.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Variables that must not leak from the outer environment into a run
const ISOLATED_VARS: &[&str] = &[
    "GITHUB_ACTIONS",
    "GITHUB_TOKEN",
    "RUST_LOG",
    "INPUT_VERSIONTAG",
    "INPUT_CONFIGJSON",
    "INPUT_WRANGLERTOML",
    "DEPLOYER_CONFIG",
    "DEPLOYER_OWNER",
    "DEPLOYER_REPO",
    "DEPLOYER_API_URL",
    "DEPLOYER_STRATEGY",
    "DEPLOYER_RUN_FROM",
    "DEPLOYER_WORK_DIR",
    "DEPLOYER_DRY_RUN",
    "DEPLOYER_ENVIRONMENT",
];

/// Result of running the CLI
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Last non-empty stdout line (the outcome line)
    pub fn outcome_line(&self) -> &str {
        self.stdout
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("")
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated project directory with the CLI binary at hand
pub struct TestEnv {
    pub project_root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().expect("Failed to create temp dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_release-deployer")),
        }
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Write a file relative to project root, creating parent directories
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn read_file(&self, relative: &str) -> String {
        std::fs::read_to_string(self.project_path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Write the two configuration inputs with the default fixture contents
    pub fn write_inputs(&self) {
        self.write_file("inputs/wrangler.toml", super::TOOL_CONFIG);
        self.write_file("inputs/api-config.json", super::APP_CONFIG);
    }

    /// Run the CLI from project root with a valid token
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[("GITHUB_TOKEN", "test-token")])
    }

    /// Run the CLI from project root with exactly the given extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, env_vars)
    }

    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd).args(args);
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute release-deployer");
        output_to_result(output)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
