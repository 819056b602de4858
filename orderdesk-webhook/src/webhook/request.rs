//! Inbound request as handed over by the hosting platform.

use std::collections::HashMap;

/// Header carrying the Foxy event type.
pub const EVENT_HEADER: &str = "foxy-webhook-event";

/// Header carrying the Foxy HMAC signature of the body.
pub const SIGNATURE_HEADER: &str = "foxy-webhook-signature";

/// A single webhook call: method, headers and the raw body.
///
/// Header names are stored lowercased so lookups ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomingRequest {
    pub http_method: String,
    headers: HashMap<String, String>,
    pub body: String,
}

impl IncomingRequest {
    pub fn new(http_method: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert_header(name, value);
        self
    }

    pub fn insert_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn is_get(&self) -> bool {
        self.http_method == "GET"
    }

    /// Value of the `foxy-webhook-event` header, if any.
    pub fn event_type(&self) -> Option<&str> {
        self.header(EVENT_HEADER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_ignores_case() {
        let request = IncomingRequest::new("POST", "{}")
            .with_header("Foxy-Webhook-Event", "transaction/created");

        assert_eq!(request.event_type(), Some("transaction/created"));
        assert_eq!(request.header("FOXY-WEBHOOK-EVENT"), Some("transaction/created"));
        assert_eq!(request.header(SIGNATURE_HEADER), None);
    }

    #[test]
    fn test_is_get_is_exact() {
        assert!(IncomingRequest::new("GET", "").is_get());
        assert!(!IncomingRequest::new("get", "").is_get());
        assert!(!IncomingRequest::new("POST", "").is_get());
    }
}
