//! Asset and payload selection
//!
//! The first asset the service lists is chosen. There is no ranking by name
//! or type. A release without assets is rejected even when it has a bundle.

use crate::domain::entities::{AssetRef, PayloadKind, PayloadRef, ReleaseDescriptor};
use crate::domain::value_objects::StagingStrategy;
use crate::error::{DeployError, DeployResult};

/// Pick the deployable asset of a release
pub fn select_asset(descriptor: &ReleaseDescriptor) -> DeployResult<&AssetRef> {
    descriptor.assets.first().ok_or_else(|| DeployError::NoAsset {
        tag: descriptor.tag.clone(),
        detail: "assets",
    })
}

/// Decide what the stager downloads for the given strategy
pub fn select_payload(
    descriptor: &ReleaseDescriptor,
    asset: &AssetRef,
    strategy: StagingStrategy,
) -> DeployResult<PayloadRef> {
    match strategy {
        StagingStrategy::Asset => Ok(PayloadRef {
            kind: PayloadKind::Asset,
            name: sanitize_file_name(&asset.name),
            url: asset.download_url.clone(),
        }),
        StagingStrategy::Bundle => {
            let url = descriptor
                .bundle_url
                .clone()
                .ok_or_else(|| DeployError::NoAsset {
                    tag: descriptor.tag.clone(),
                    detail: "source bundle",
                })?;
            Ok(PayloadRef {
                kind: PayloadKind::Bundle,
                name: format!("{}.zip", sanitize_file_name(&descriptor.tag)),
                url,
            })
        }
    }
}

/// Tags and asset names may contain `/`; keep local file names flat
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '-',
            c => c,
        })
        .collect()
}
