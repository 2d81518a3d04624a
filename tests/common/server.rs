//! In-process release service for integration tests.
//!
//! Serves canned responses by request path and records every request it
//! receives, including the `Authorization` header.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use tiny_http::{Header, Response, Server};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub api_version: Option<String>,
}

#[derive(Debug, Clone)]
struct Canned {
    status: u16,
    body: Vec<u8>,
    content_type: &'static str,
}

pub struct FakeReleaseServer {
    server: Arc<Server>,
    base_url: String,
    routes: Arc<Mutex<HashMap<String, Canned>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<JoinHandle<()>>,
}

impl FakeReleaseServer {
    pub fn start() -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("http server"));
        let addr = server.server_addr().to_ip().expect("ip listener");
        let base_url = format!("http://{}", addr);
        let routes: Arc<Mutex<HashMap<String, Canned>>> = Arc::default();
        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::default();

        let handle = {
            let server = Arc::clone(&server);
            let routes = Arc::clone(&routes);
            let requests = Arc::clone(&requests);
            thread::spawn(move || {
                for request in server.incoming_requests() {
                    let header = |name: &'static str| {
                        request
                            .headers()
                            .iter()
                            .find(|h| h.field.equiv(name))
                            .map(|h| h.value.as_str().to_string())
                    };
                    let path = request.url().to_string();
                    requests.lock().unwrap().push(RecordedRequest {
                        method: request.method().to_string(),
                        path: path.clone(),
                        authorization: header("Authorization"),
                        accept: header("Accept"),
                        api_version: header("X-GitHub-Api-Version"),
                    });

                    let canned = routes.lock().unwrap().get(&path).cloned();
                    let response = match canned {
                        Some(canned) => Response::from_data(canned.body)
                            .with_status_code(canned.status)
                            .with_header(
                                Header::from_bytes("Content-Type", canned.content_type).unwrap(),
                            ),
                        None => Response::from_data(br#"{"message":"Not Found"}"#.to_vec())
                            .with_status_code(404),
                    };
                    let _ = request.respond(response);
                }
            })
        };

        Self {
            server,
            base_url,
            routes,
            requests,
            handle: Some(handle),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Path of the release-by-tag endpoint
    pub fn release_path(owner: &str, repo: &str, tag: &str) -> String {
        format!("/repos/{}/{}/releases/tags/{}", owner, repo, tag)
    }

    pub fn json(&self, path: &str, status: u16, body: impl Into<String>) {
        self.routes.lock().unwrap().insert(
            path.to_string(),
            Canned {
                status,
                body: body.into().into_bytes(),
                content_type: "application/json; charset=utf-8",
            },
        );
    }

    pub fn bytes(&self, path: &str, body: Vec<u8>) {
        self.routes.lock().unwrap().insert(
            path.to_string(),
            Canned {
                status: 200,
                body,
                content_type: "application/octet-stream",
            },
        );
    }

    /// Publish `release` (see `release_json`) for `acme/gw`
    pub fn publish(&self, tag: &str, release: serde_json::Value) {
        self.json(
            &Self::release_path("acme", "gw", tag),
            200,
            release.to_string(),
        );
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for FakeReleaseServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
