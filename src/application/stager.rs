//! Artifact Stager
//!
//! Turns a resolved release into a staged tree:
//! 1. Download the payload into a scoped temporary file
//! 2. Extract it when it is an archive and locate the single top-level directory
//! 3. Move the deployable sources to their well-known location
//! 4. Overlay the two caller-supplied configuration files
//!
//! Every step depends on the previous one succeeding. Intermediate files are
//! handed to `TransientArtifacts` as soon as they exist, so the pipeline
//! removes them on every exit path.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::entities::{
    DeploymentRequest, PayloadKind, PayloadRef, ResolvedRelease, StagedWorkspace,
    TransientArtifacts, CONFIG_JSON_INPUT, TOOL_CONFIG_INPUT,
};
use crate::domain::ports::{ArchiveExtractor, PipelineEvent, PipelineEventSink, ReleaseSource};
use crate::domain::services::{locate_top_level, TopLevelEntry};
use crate::error::{DeployError, DeployResult};

/// Where things land inside the working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingLayout {
    pub work_dir: PathBuf,
    /// Sub-directory of the extracted top-level directory that is relocated.
    /// Empty relocates the whole top-level directory.
    pub source_dir: String,
    pub archive_prefix: String,
    /// Tool config target, relative to the staged tree
    pub tool_config_path: PathBuf,
    /// Application config target, relative to the staged tree
    pub app_config_path: PathBuf,
}

/// Second stage of the pipeline
pub struct ArtifactStager<'a, RS, AE>
where
    RS: ReleaseSource + ?Sized,
    AE: ArchiveExtractor + ?Sized,
{
    source: &'a RS,
    extractor: &'a AE,
    layout: &'a StagingLayout,
}

impl<'a, RS, AE> ArtifactStager<'a, RS, AE>
where
    RS: ReleaseSource + ?Sized,
    AE: ArchiveExtractor + ?Sized,
{
    pub fn new(source: &'a RS, extractor: &'a AE, layout: &'a StagingLayout) -> Self {
        Self {
            source,
            extractor,
            layout,
        }
    }

    /// Stage `release` with the configuration files named by `request`.
    ///
    /// Callers must not run this concurrently for the same working directory.
    pub fn stage(
        &self,
        release: &ResolvedRelease,
        request: &DeploymentRequest,
        artifacts: &mut TransientArtifacts,
        events: &dyn PipelineEventSink,
    ) -> DeployResult<StagedWorkspace> {
        let work_dir = &self.layout.work_dir;
        fs::create_dir_all(work_dir).map_err(|e| {
            DeployError::io(
                format!("failed to create working directory {}", work_dir.display()),
                e,
            )
        })?;

        let payload_path = self.download(&release.payload, artifacts, events)?;

        let extracted = self.extractor.is_archive(&payload_path)?;
        let root_path = if extracted {
            self.unpack(&payload_path, artifacts, events)?
        } else if release.payload.kind == PayloadKind::Bundle {
            return Err(DeployError::layout(format!(
                "source bundle of release {} is not a zip archive",
                release.tag()
            )));
        } else {
            info!(payload = %payload_path.display(), "Payload is not an archive, staging it as-is");
            work_dir.clone()
        };

        let mut overlaid = Vec::with_capacity(2);
        for (input, source, target) in [
            (
                TOOL_CONFIG_INPUT,
                request.tool_config_file(),
                &self.layout.tool_config_path,
            ),
            (
                CONFIG_JSON_INPUT,
                request.config_file(),
                &self.layout.app_config_path,
            ),
        ] {
            let target = root_path.join(target);
            overlay(input, source, &target)?;
            events.on_event(PipelineEvent::ConfigOverlaid {
                source: source.to_path_buf(),
                target: target.clone(),
            });
            overlaid.push(target);
        }

        Ok(StagedWorkspace {
            root_path,
            extracted,
            work_dir: work_dir.clone(),
            payload_path: (!extracted).then_some(payload_path),
            overlaid,
        })
    }

    /// Download into `temp-<name>` inside the working directory.
    ///
    /// The file is only tracked once the download completed; on error the
    /// handle is dropped and the partial file removed with it.
    fn download(
        &self,
        payload: &PayloadRef,
        artifacts: &mut TransientArtifacts,
        events: &dyn PipelineEventSink,
    ) -> DeployResult<PathBuf> {
        info!(name = %payload.name, url = %payload.url, "Downloading payload");
        events.on_event(PipelineEvent::PayloadSelected {
            name: payload.name.clone(),
            url: payload.url.clone(),
        });

        let suffix = format!("-{}", payload.name);
        let mut file = tempfile::Builder::new()
            .prefix("temp-")
            .suffix(&suffix)
            .tempfile_in(&self.layout.work_dir)
            .map_err(|e| DeployError::io("failed to create download file", e))?;

        let bytes = self.source.download(&payload.url, file.as_file_mut())?;
        file.as_file_mut()
            .flush()
            .map_err(|e| DeployError::Download {
                url: payload.url.clone(),
                message: e.to_string(),
            })?;

        let path = artifacts.track_file(file);
        debug!(path = %path.display(), bytes, "Payload downloaded");
        events.on_event(PipelineEvent::PayloadDownloaded {
            path: path.clone(),
            bytes,
        });
        Ok(path)
    }

    /// Extract into a scratch directory and move the sources into place
    fn unpack(
        &self,
        archive: &Path,
        artifacts: &mut TransientArtifacts,
        events: &dyn PipelineEventSink,
    ) -> DeployResult<PathBuf> {
        let work_dir = &self.layout.work_dir;
        let scratch = tempfile::Builder::new()
            .prefix(".extract-")
            .tempdir_in(work_dir)
            .map_err(|e| DeployError::io("failed to create extraction directory", e))?;
        let scratch = artifacts.track_dir(scratch);

        info!(archive = %archive.display(), "Extracting payload");
        self.extractor.extract(archive, &scratch)?;
        events.on_event(PipelineEvent::ArchiveExtracted {
            archive: archive.to_path_buf(),
            directory: scratch.clone(),
        });

        let top = locate_top_level(&list_top_level(&scratch)?, &self.layout.archive_prefix)?;
        let (from, to) = if self.layout.source_dir.is_empty() {
            (scratch.join(&top), work_dir.join(&top))
        } else {
            (
                scratch.join(&top).join(&self.layout.source_dir),
                work_dir.join(&self.layout.source_dir),
            )
        };

        if !from.is_dir() {
            return Err(DeployError::layout(format!(
                "release tree {} has no '{}' directory",
                top, self.layout.source_dir
            )));
        }
        relocate(&from, &to)?;
        info!(to = %to.display(), "Moved release sources into place");
        events.on_event(PipelineEvent::TreeRelocated {
            from,
            to: to.clone(),
        });
        Ok(to)
    }
}

fn list_top_level(dir: &Path) -> DeployResult<Vec<TopLevelEntry>> {
    let read_error = |e| DeployError::io(format!("failed to list {}", dir.display()), e);
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        let is_dir = entry.file_type().map_err(read_error)?.is_dir();
        entries.push(TopLevelEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }
    Ok(entries)
}

/// Move `from` to `to`, replacing a tree left by an earlier run.
///
/// Any failure is an `ExtractionLayout` error; the staged path is never used
/// unless the move succeeded.
pub fn relocate(from: &Path, to: &Path) -> DeployResult<()> {
    if let Ok(metadata) = fs::symlink_metadata(to) {
        let removed = if metadata.is_dir() {
            fs::remove_dir_all(to)
        } else {
            fs::remove_file(to)
        };
        removed.map_err(|e| {
            DeployError::layout(format!("could not replace {}: {}", to.display(), e))
        })?;
    }
    fs::rename(from, to).map_err(|e| {
        DeployError::layout(format!(
            "could not move {} to {}: {}",
            from.display(),
            to.display(),
            e
        ))
    })
}

/// Copy `source` to `target` byte for byte, overwriting whatever is there
pub fn overlay(input: &str, source: &Path, target: &Path) -> DeployResult<()> {
    let bytes = fs::read(source).map_err(|e| DeployError::unreadable_input(input, source, e))?;
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| DeployError::io(format!("failed to create {}", parent.display()), e))?;
    }
    fs::write(target, bytes)
        .map_err(|e| DeployError::io(format!("failed to write {}", target.display()), e))
}
