//! Common test utilities for release-deployer integration tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated working directory plus helpers to run the CLI
//! - `FakeReleaseServer`: In-process release service over tiny_http
//! - Fixtures: Configuration contents and archive builders
//! - Assertions: Checks for leftover transient artifacts

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;
pub mod server;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
pub use server::*;
