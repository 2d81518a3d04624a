//! Archive extractor port

use std::path::Path;

use crate::error::DeployResult;

/// Detects and unpacks packaged payloads
pub trait ArchiveExtractor {
    /// Whether the file at `path` is an archive this extractor understands
    fn is_archive(&self, path: &Path) -> DeployResult<bool>;

    /// Unpack `archive` into the existing directory `dest`
    fn extract(&self, archive: &Path, dest: &Path) -> DeployResult<()>;
}
