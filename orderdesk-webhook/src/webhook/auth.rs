//! Authenticity check applied to every non-GET request.

use std::fmt;

use super::request::IncomingRequest;

/// Why a request was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDescriptor {
    pub message: String,
}

impl ErrorDescriptor {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Verifies that a request comes from the trusted webhook source.
pub trait AuthValidator: Send + Sync {
    /// `None` when the request is valid.
    fn get_error(&self, request: &IncomingRequest) -> Option<ErrorDescriptor>;
}
