//! Foxy event types understood by the receiver.

use std::fmt;

/// Event type derived from the `foxy-webhook-event` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebhookEvent {
    /// `validation/payment`: cart check before the payment is captured
    PrePayment,
    /// `transaction/created`: a completed order
    TransactionCreated,
    /// Anything else, including a missing header
    Unknown,
}

impl WebhookEvent {
    /// Classify a header value. Matching is exact and case-sensitive.
    pub fn from_header(value: Option<&str>) -> Self {
        match value {
            Some("validation/payment") => WebhookEvent::PrePayment,
            Some("transaction/created") => WebhookEvent::TransactionCreated,
            _ => WebhookEvent::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookEvent::PrePayment => "validation/payment",
            WebhookEvent::TransactionCreated => "transaction/created",
            WebhookEvent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
