//! JSON Event Sink
//!
//! Outputs pipeline events as NDJSON for CI/automation consumption.

use crate::domain::ports::{PipelineEvent, PipelineEventSink};
use chrono::{SecondsFormat, Utc};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Write one line, stamping it with the current UTC time
    pub fn write_value(&self, mut value: serde_json::Value) {
        if let Some(object) = value.as_object_mut() {
            object.insert(
                "ts".to_string(),
                serde_json::Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            );
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", value);
            let _ = writer.flush();
        }
    }
}

fn event_json(event: PipelineEvent) -> serde_json::Value {
    match event {
        PipelineEvent::StateChanged { from, to } => serde_json::json!({
            "event": "state",
            "from": from.name(),
            "to": to.name(),
            "detail": to.to_string(),
        }),

        PipelineEvent::ReleaseResolved {
            tag,
            asset_count,
            has_bundle,
        } => serde_json::json!({
            "event": "release_resolved",
            "tag": tag,
            "asset_count": asset_count,
            "has_bundle": has_bundle,
        }),

        PipelineEvent::PayloadSelected { name, url } => serde_json::json!({
            "event": "payload_selected",
            "name": name,
            "url": url,
        }),

        PipelineEvent::PayloadDownloaded { path, bytes } => serde_json::json!({
            "event": "payload_downloaded",
            "path": path.display().to_string(),
            "bytes": bytes,
        }),

        PipelineEvent::ArchiveExtracted { archive, directory } => serde_json::json!({
            "event": "archive_extracted",
            "archive": archive.display().to_string(),
            "directory": directory.display().to_string(),
        }),

        PipelineEvent::TreeRelocated { from, to } => serde_json::json!({
            "event": "tree_relocated",
            "from": from.display().to_string(),
            "to": to.display().to_string(),
        }),

        PipelineEvent::ConfigOverlaid { source, target } => serde_json::json!({
            "event": "config_overlaid",
            "source": source.display().to_string(),
            "target": target.display().to_string(),
        }),

        PipelineEvent::CommandStarted { command, cwd } => serde_json::json!({
            "event": "command_started",
            "command": command,
            "cwd": cwd.display().to_string(),
        }),

        PipelineEvent::CommandFinished { command, exit_code } => serde_json::json!({
            "event": "command_finished",
            "command": command,
            "exit_code": exit_code,
        }),

        PipelineEvent::ArtifactRemoved { path } => serde_json::json!({
            "event": "artifact_removed",
            "path": path.display().to_string(),
        }),

        PipelineEvent::CleanupWarning { path, message } => serde_json::json!({
            "event": "cleanup_warning",
            "path": path.display().to_string(),
            "message": message,
        }),
    }
}

impl PipelineEventSink for JsonEventSink {
    fn on_event(&self, event: PipelineEvent) {
        self.write_value(event_json(event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{PipelineState, Stage};
    use crate::error::ErrorKind;
    use std::path::PathBuf;
    use std::sync::Arc;

    struct TestWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl TestWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buffer = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    buffer: buffer.clone(),
                },
                buffer,
            )
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn lines(buffer: &Arc<Mutex<Vec<u8>>>) -> Vec<serde_json::Value> {
        String::from_utf8(buffer.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn json_sink_outputs_state_event() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(PipelineEvent::StateChanged {
            from: PipelineState::Resolving,
            to: PipelineState::Failed {
                stage: Stage::Resolving,
                kind: ErrorKind::ReleaseNotFound,
            },
        });

        let events = lines(&buffer);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["event"], "state");
        assert_eq!(events[0]["to"], "failed");
        assert_eq!(events[0]["detail"], "failed(ReleaseNotFound during resolving)");
        assert!(events[0]["ts"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn json_sink_outputs_download_event() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(PipelineEvent::PayloadDownloaded {
            path: PathBuf::from("temp-v1.2.0.zip"),
            bytes: 2048,
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "payload_downloaded");
        assert_eq!(events[0]["bytes"], 2048);
    }

    #[test]
    fn json_sink_outputs_null_exit_code_for_signal() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(PipelineEvent::CommandFinished {
            command: "npx wrangler deploy".to_string(),
            exit_code: None,
        });

        assert!(lines(&buffer)[0]["exit_code"].is_null());
    }
}
