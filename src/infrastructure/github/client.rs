//! Blocking GitHub REST client
//!
//! One request per call, no retries, no client-side timeout. The bearer
//! credential is sent on the release lookup and on every download.

use std::io::{Read, Write};
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use reqwest::{StatusCode, Url};
use tracing::debug;

use crate::domain::entities::ReleaseDescriptor;
use crate::domain::ports::ReleaseSource;
use crate::domain::value_objects::AccessToken;
use crate::error::{DeployError, DeployResult};

use super::wire::parse_release;

/// REST API version requested on every call
pub const API_VERSION: &str = "2022-11-28";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// `ReleaseSource` backed by the GitHub REST API
#[derive(Debug, Clone)]
pub struct GithubReleaseSource {
    client: Client,
    api_url: Url,
    token: Option<AccessToken>,
}

impl GithubReleaseSource {
    /// Build a client for `api_url`.
    ///
    /// A missing token is accepted here and reported as a transport error on
    /// the first request, so input validation still happens first.
    pub fn new(api_url: &str, token: Option<AccessToken>) -> DeployResult<Self> {
        let parsed = Url::parse(api_url).map_err(|e| {
            DeployError::configuration(format!("invalid release.api_url '{}': {}", api_url, e))
        })?;
        if parsed.cannot_be_a_base() {
            return Err(DeployError::configuration(format!(
                "invalid release.api_url '{}': not a base URL",
                api_url
            )));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| DeployError::Transport {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            api_url: parsed,
            token,
        })
    }

    fn token(&self) -> DeployResult<&AccessToken> {
        self.token.as_ref().ok_or_else(|| DeployError::Transport {
            message: "no access token available for the release service".to_string(),
        })
    }

    fn release_url(&self, owner: &str, repo: &str, tag: &str) -> DeployResult<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| DeployError::configuration("release.api_url is not a base URL"))?
            .pop_if_empty()
            .extend(["repos", owner, repo, "releases", "tags", tag]);
        Ok(url)
    }
}

impl ReleaseSource for GithubReleaseSource {
    fn fetch_release(&self, owner: &str, repo: &str, tag: &str) -> DeployResult<ReleaseDescriptor> {
        let token = self.token()?;
        let url = self.release_url(owner, repo, tag)?;
        debug!(url = %url, "Requesting release");

        let response = self
            .client
            .get(url)
            .bearer_auth(token.expose())
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .map_err(|e| DeployError::Transport {
                message: e.to_string(),
            })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => {
                return Err(DeployError::ReleaseNotFound {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                    tag: tag.to_string(),
                })
            }
            status @ (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                return Err(DeployError::Transport {
                    message: format!("access token rejected ({})", status),
                })
            }
            status => {
                return Err(DeployError::Transport {
                    message: format!("unexpected status {} from {}", status, response.url()),
                })
            }
        }

        let body = read_body(response).map_err(|e| DeployError::Transport {
            message: format!("failed to read release response: {}", e),
        })?;
        parse_release(&body, tag)
    }

    fn download(&self, url: &str, sink: &mut dyn Write) -> DeployResult<u64> {
        let token = self.token()?;
        let failed = |message: String| DeployError::Download {
            url: url.to_string(),
            message,
        };

        let mut response = self
            .client
            .get(url)
            .bearer_auth(token.expose())
            .header(ACCEPT, "application/octet-stream")
            .send()
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("server answered {}", status)));
        }

        let expected = response.content_length();
        let written = std::io::copy(&mut response, sink).map_err(|e| failed(e.to_string()))?;
        if let Some(expected) = expected {
            if written < expected {
                return Err(failed(format!(
                    "stream ended after {} of {} bytes",
                    written, expected
                )));
            }
        }
        debug!(url, bytes = written, "Download complete");
        Ok(written)
    }
}

fn read_body(mut response: Response) -> std::io::Result<Vec<u8>> {
    let mut body = Vec::new();
    response.read_to_end(&mut body)?;
    Ok(body)
}
