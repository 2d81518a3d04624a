//! Staged workspace and transient artifacts
//!
//! `TransientArtifacts` owns every intermediate file or directory the stager
//! creates. Ownership is scoped: `release()` removes them and reports what
//! happened, and dropping the value without calling `release()` still removes
//! them (the `tempfile` handles delete on drop).

use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempDir};

/// The local tree prepared for the deploy tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedWorkspace {
    /// Root of the staged tree (tool config lives here)
    pub root_path: PathBuf,
    /// Whether the payload was an archive that got extracted
    pub extracted: bool,
    /// Working directory that contains the staged tree
    pub work_dir: PathBuf,
    /// Downloaded payload left in place when it was not an archive
    pub payload_path: Option<PathBuf>,
    /// Overlay targets written into the tree
    pub overlaid: Vec<PathBuf>,
}

/// Non-fatal problem while removing a transient artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupWarning {
    pub path: PathBuf,
    pub message: String,
}

impl std::fmt::Display for CleanupWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "could not remove {}: {}", self.path.display(), self.message)
    }
}

/// What cleanup did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub warnings: Vec<CleanupWarning>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

enum Artifact {
    File(NamedTempFile),
    Dir(TempDir),
}

impl Artifact {
    fn path(&self) -> &Path {
        match self {
            Artifact::File(file) => file.path(),
            Artifact::Dir(dir) => dir.path(),
        }
    }

    fn close(self) -> std::io::Result<()> {
        match self {
            Artifact::File(file) => file.close(),
            Artifact::Dir(dir) => dir.close(),
        }
    }
}

/// Intermediate files owned by one pipeline run
#[derive(Default)]
pub struct TransientArtifacts {
    artifacts: Vec<Artifact>,
}

impl TransientArtifacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a downloaded file; returns its path
    pub fn track_file(&mut self, file: NamedTempFile) -> PathBuf {
        let path = file.path().to_path_buf();
        self.artifacts.push(Artifact::File(file));
        path
    }

    /// Take ownership of a scratch directory; returns its path
    pub fn track_dir(&mut self, dir: TempDir) -> PathBuf {
        let path = dir.path().to_path_buf();
        self.artifacts.push(Artifact::Dir(dir));
        path
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.artifacts.iter().map(|a| a.path().to_path_buf()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Remove every artifact, newest first. Failures become warnings.
    pub fn release(mut self) -> CleanupReport {
        let mut report = CleanupReport::default();
        while let Some(artifact) = self.artifacts.pop() {
            let path = artifact.path().to_path_buf();
            match artifact.close() {
                Ok(()) => report.removed.push(path),
                Err(e) => report.warnings.push(CleanupWarning {
                    path,
                    message: e.to_string(),
                }),
            }
        }
        report
    }
}

impl std::fmt::Debug for TransientArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransientArtifacts")
            .field("paths", &self.paths())
            .finish()
    }
}
