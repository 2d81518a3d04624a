//! Release Resolver
//!
//! Looks up the release for a tag and decides which payload gets staged.
//! One outbound read-only call, no retries.

use tracing::{debug, info};

use crate::domain::entities::ResolvedRelease;
use crate::domain::ports::ReleaseSource;
use crate::domain::services::{select_asset, select_payload};
use crate::domain::value_objects::StagingStrategy;
use crate::error::DeployResult;

/// First stage of the pipeline
pub struct ReleaseResolver<'a, RS: ReleaseSource + ?Sized> {
    source: &'a RS,
    strategy: StagingStrategy,
}

impl<'a, RS: ReleaseSource + ?Sized> ReleaseResolver<'a, RS> {
    pub fn new(source: &'a RS, strategy: StagingStrategy) -> Self {
        Self { source, strategy }
    }

    /// Resolve `owner/repo@tag` into a release and a payload to download.
    ///
    /// A release without assets fails with `NoAsset` even when it carries a
    /// source bundle; the bundle strategy additionally needs a bundle URL.
    pub fn resolve(&self, owner: &str, repo: &str, tag: &str) -> DeployResult<ResolvedRelease> {
        info!(owner, repo, tag, "Fetching release");
        let descriptor = self.source.fetch_release(owner, repo, tag)?;
        debug!(
            assets = descriptor.assets.len(),
            bundle = descriptor.bundle_url.is_some(),
            "Release found"
        );

        let asset = select_asset(&descriptor)?.clone();
        let payload = select_payload(&descriptor, &asset, self.strategy)?;

        Ok(ResolvedRelease {
            descriptor,
            asset,
            payload,
        })
    }
}
