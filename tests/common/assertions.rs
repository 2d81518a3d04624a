//! Assertions shared by the CLI tests.

use std::path::Path;

/// Names of transient artifacts (downloads, extraction dirs) left in `dir`
pub fn leftover_artifacts(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .filter(|n| n.starts_with("temp-") || n.starts_with(".extract-"))
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// Assert that no transient artifact survived the run.
///
/// # Example
/// ```ignore
/// assert_no_leftovers!(env.project_root.path());
/// ```
#[macro_export]
macro_rules! assert_no_leftovers {
    ($dir:expr) => {
        let leftovers = $crate::common::leftover_artifacts($dir);
        assert!(
            leftovers.is_empty(),
            "Expected no transient artifacts in {:?}, found:\n  {}",
            $dir,
            leftovers.join("\n  ")
        );
    };
}

/// Assert that output contains expected text.
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $text:expr) => {
        let combined = $result.combined_output();
        assert!(
            combined.contains($text),
            "Expected output to contain '{}', but it doesn't.\n\
             stdout:\n{}\n\
             stderr:\n{}",
            $text,
            $result.stdout,
            $result.stderr
        );
    };
}
