//! GitHub release source
//!
//! - `client` - blocking HTTPS client implementing `ReleaseSource`
//! - `wire` - JSON response shapes

mod client;
mod wire;

pub use client::{GithubReleaseSource, API_VERSION};
pub use wire::{parse_release, WireAsset, WireRelease};
