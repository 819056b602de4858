//! Diagnostic checkpoints of the webhook pipeline.
//!
//! The pipeline reports through [`WebhookLog`] instead of calling `tracing`
//! directly, so tests can assert on what was reported.

use tracing::{error, info, warn};

use super::dispatch::PayloadError;
use super::request::IncomingRequest;

pub trait WebhookLog: Send + Sync {
    /// A required credential is not configured.
    fn credential_missing(&self, name: &str);

    /// A GET request was answered without processing.
    fn get_probe(&self);

    /// The event type matched no handler.
    fn unrecognized_event(&self, request: &IncomingRequest, event: Option<&str>);

    /// The request body could not be parsed.
    fn invalid_payload(&self, request: &IncomingRequest, error: &PayloadError);
}

/// Production log backed by `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl WebhookLog for TracingLog {
    fn credential_missing(&self, name: &str) {
        error!(env_var = name, "credential_missing");
    }

    fn get_probe(&self) {
        info!(status_code = 200, "webhook_get_probe");
    }

    fn unrecognized_event(&self, request: &IncomingRequest, event: Option<&str>) {
        error!(
            method = %request.http_method,
            headers = ?request.headers(),
            body = %request.body,
            event = event.unwrap_or(""),
            marker = "BadRequest",
            "webhook_bad_request"
        );
    }

    fn invalid_payload(&self, request: &IncomingRequest, error: &PayloadError) {
        warn!(
            method = %request.http_method,
            event = request.event_type().unwrap_or(""),
            body_length = request.body.len(),
            error = %error,
            "webhook_invalid_payload"
        );
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum LogEntry {
        CredentialMissing(String),
        GetProbe,
        UnrecognizedEvent {
            request: IncomingRequest,
            event: Option<String>,
        },
        InvalidPayload,
    }

    /// Log that keeps every checkpoint in memory.
    #[derive(Debug, Default)]
    pub struct RecordingLog {
        entries: Mutex<Vec<LogEntry>>,
    }

    impl RecordingLog {
        pub fn entries(&self) -> Vec<LogEntry> {
            self.entries.lock().unwrap().clone()
        }

        fn push(&self, entry: LogEntry) {
            self.entries.lock().unwrap().push(entry);
        }
    }

    impl WebhookLog for RecordingLog {
        fn credential_missing(&self, name: &str) {
            self.push(LogEntry::CredentialMissing(name.to_string()));
        }

        fn get_probe(&self) {
            self.push(LogEntry::GetProbe);
        }

        fn unrecognized_event(&self, request: &IncomingRequest, event: Option<&str>) {
            self.push(LogEntry::UnrecognizedEvent {
                request: request.clone(),
                event: event.map(str::to_string),
            });
        }

        fn invalid_payload(&self, _request: &IncomingRequest, _error: &PayloadError) {
            self.push(LogEntry::InvalidPayload);
        }
    }
}
