//! Event Sink Implementations
//!
//! Provides concrete implementations of PipelineEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - TracingEventSink: structured log records

mod json;
mod log;

pub use json::JsonEventSink;
pub use log::TracingEventSink;
