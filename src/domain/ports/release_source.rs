//! Release source port - the release-hosting service
//!
//! Implementations:
//! - `GithubReleaseSource` - GitHub REST API over HTTPS
//! - in-memory fakes in tests

use std::io::Write;

use crate::domain::entities::ReleaseDescriptor;
use crate::error::DeployResult;

/// Read-only access to published releases
pub trait ReleaseSource {
    /// Look up the release for `tag`.
    ///
    /// Fails with `ReleaseNotFound` when the service has no such release and
    /// with `Transport` on network or credential problems.
    fn fetch_release(&self, owner: &str, repo: &str, tag: &str) -> DeployResult<ReleaseDescriptor>;

    /// Stream the bytes behind `url` into `sink`, returning the byte count.
    ///
    /// A non-success status, a stream error or a short body is a `Download`
    /// error. The caller owns `sink` and is responsible for discarding it.
    fn download(&self, url: &str, sink: &mut dyn Write) -> DeployResult<u64>;
}
