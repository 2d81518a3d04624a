//! Zip archive extraction

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::ports::ArchiveExtractor;
use crate::error::{DeployError, DeployResult};

/// Local file header, and the end-of-central-directory record of an empty zip
const ZIP_MAGIC: [&[u8; 4]; 2] = [b"PK\x03\x04", b"PK\x05\x06"];

/// Extracts zip archives (source bundles and zipped assets)
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveExtractor;

impl ArchiveExtractor for ZipArchiveExtractor {
    fn is_archive(&self, path: &Path) -> DeployResult<bool> {
        let file = File::open(path)
            .map_err(|e| DeployError::io(format!("failed to open {}", path.display()), e))?;
        let mut magic = Vec::with_capacity(4);
        file.take(4)
            .read_to_end(&mut magic)
            .map_err(|e| DeployError::io(format!("failed to read {}", path.display()), e))?;
        Ok(ZIP_MAGIC.iter().any(|m| magic.as_slice() == m.as_slice()))
    }

    fn extract(&self, archive: &Path, dest: &Path) -> DeployResult<()> {
        let file = File::open(archive)
            .map_err(|e| DeployError::io(format!("failed to open {}", archive.display()), e))?;
        let mut zip = zip::ZipArchive::new(file).map_err(|e| {
            DeployError::layout(format!("{} is not a valid zip archive: {}", archive.display(), e))
        })?;
        // Entries with absolute or `..` paths are rejected by the zip crate
        zip.extract(dest).map_err(|e| {
            DeployError::layout(format!("failed to extract {}: {}", archive.display(), e))
        })
    }
}
