//! Release-service response shapes

use serde::Deserialize;

use crate::domain::entities::{AssetRef, ReleaseDescriptor};
use crate::error::{DeployError, DeployResult};

/// `GET /repos/{owner}/{repo}/releases/tags/{tag}` response (fields we use)
#[derive(Debug, Deserialize)]
pub struct WireRelease {
    #[serde(default)]
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<WireAsset>,
    #[serde(default)]
    pub zipball_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireAsset {
    pub name: String,
    pub browser_download_url: String,
}

impl WireRelease {
    /// Convert to the domain type; `requested_tag` fills in a missing tag name
    pub fn into_descriptor(self, requested_tag: &str) -> ReleaseDescriptor {
        let tag = if self.tag_name.is_empty() {
            requested_tag.to_string()
        } else {
            self.tag_name
        };
        ReleaseDescriptor {
            tag,
            assets: self
                .assets
                .into_iter()
                .map(|a| AssetRef::new(a.name, a.browser_download_url))
                .collect(),
            bundle_url: self.zipball_url.filter(|u| !u.is_empty()),
        }
    }
}

/// Parse a release document
pub fn parse_release(body: &[u8], requested_tag: &str) -> DeployResult<ReleaseDescriptor> {
    let wire: WireRelease = serde_json::from_slice(body).map_err(|e| DeployError::Transport {
        message: format!("malformed release response: {}", e),
    })?;
    Ok(wire.into_descriptor(requested_tag))
}
