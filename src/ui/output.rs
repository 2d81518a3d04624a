//! Outcome rendering
//!
//! Exactly one terminal outcome line goes to stdout. Everything else
//! (config warnings, cleanup warnings outside CI) goes to stderr.

use crate::application::{PipelineFailure, PipelineReport};
use crate::config::ConfigWarning;
use crate::domain::entities::CleanupWarning;

use super::ci::{github_actions_annotation, AnnotationLevel};

pub const SUCCESS_LINE: &str = "Deployment successful!";

/// Failure line; inside GitHub Actions an `::error` workflow command
pub fn render_failure(failure: &PipelineFailure, ci: bool) -> String {
    let message = failure.to_string();
    if ci {
        let title = format!("{} during {}", failure.error.kind(), failure.stage);
        github_actions_annotation(AnnotationLevel::Error, &message, None, Some(&title))
    } else {
        message
    }
}

pub fn render_cleanup_warning(warning: &CleanupWarning, ci: bool) -> String {
    if ci {
        let file = warning.path.to_string_lossy();
        github_actions_annotation(
            AnnotationLevel::Warning,
            &warning.to_string(),
            Some(&file),
            Some("Cleanup warning"),
        )
    } else {
        format!("⚠ {}", warning)
    }
}

pub fn render_config_warnings(warnings: &[ConfigWarning]) -> Vec<String> {
    let mut lines = Vec::new();
    for w in warnings {
        match w.line {
            Some(line) => lines.push(format!(
                "⚠ Unknown config key '{}' in {}:{}",
                w.key,
                w.file.display(),
                line
            )),
            None => lines.push(format!(
                "⚠ Unknown config key '{}' in {}",
                w.key,
                w.file.display()
            )),
        }
        if let Some(suggestion) = &w.suggestion {
            lines.push(format!("   Did you mean '{}'?", suggestion));
        }
    }
    lines
}

/// `--json` outcome record for a successful run
pub fn success_json(report: &PipelineReport) -> serde_json::Value {
    serde_json::json!({
        "event": "complete",
        "status": "success",
        "message": SUCCESS_LINE,
        "tag": report.tag,
        "root": report.workspace.root_path.display().to_string(),
        "exit_code": report.output.exit_code,
        "cleanup_warnings": report.cleanup.warnings.len(),
        "elapsed_ms": report.elapsed_ms(),
    })
}

/// `--json` outcome record for a failed run
pub fn failure_json(failure: &PipelineFailure) -> serde_json::Value {
    serde_json::json!({
        "event": "complete",
        "status": "failed",
        "message": failure.to_string(),
        "stage": failure.stage.as_str(),
        "kind": failure.error.kind().as_str(),
        "cleanup_warnings": failure.cleanup.warnings.len(),
    })
}
