//! Release entities
//!
//! A `ReleaseDescriptor` is immutable once fetched. Selection of what to
//! download lives in `domain::services::selection`.

use crate::domain::value_objects::StagingStrategy;

/// Downloadable file attached to a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    pub name: String,
    pub download_url: String,
}

impl AssetRef {
    pub fn new(name: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            download_url: download_url.into(),
        }
    }
}

/// A tagged release as reported by the release service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDescriptor {
    pub tag: String,
    /// Assets in the order the service lists them
    pub assets: Vec<AssetRef>,
    /// Source-bundle (zipball) URL, when the service provides one
    pub bundle_url: Option<String>,
}

impl ReleaseDescriptor {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            assets: Vec::new(),
            bundle_url: None,
        }
    }

    pub fn with_asset(mut self, asset: AssetRef) -> Self {
        self.assets.push(asset);
        self
    }

    pub fn with_bundle_url(mut self, url: impl Into<String>) -> Self {
        self.bundle_url = Some(url.into());
        self
    }

    /// True when the release has neither assets nor a bundle
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty() && self.bundle_url.is_none()
    }
}

/// Which kind of payload is downloaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Asset,
    Bundle,
}

impl From<StagingStrategy> for PayloadKind {
    fn from(strategy: StagingStrategy) -> Self {
        match strategy {
            StagingStrategy::Asset => PayloadKind::Asset,
            StagingStrategy::Bundle => PayloadKind::Bundle,
        }
    }
}

/// The single payload the stager downloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadRef {
    pub kind: PayloadKind,
    /// File name used for the local temporary copy
    pub name: String,
    pub url: String,
}

/// Output of the resolver: the release plus the chosen payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelease {
    pub descriptor: ReleaseDescriptor,
    /// First asset of the release
    pub asset: AssetRef,
    pub payload: PayloadRef,
}

impl ResolvedRelease {
    pub fn tag(&self) -> &str {
        &self.descriptor.tag
    }
}
