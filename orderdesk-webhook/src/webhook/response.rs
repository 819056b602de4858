//! The uniform `{statusCode, body}` result of every webhook call.

/// Body returned when the integration is not configured.
pub const SERVICE_UNAVAILABLE: &str = "Service Unavailable. Check the webhook error logs.";

/// Body returned to GET probes.
pub const GET_REQUEST: &str = "GET Request";

/// Body returned for unrecognized events and unreadable payloads.
pub const BAD_REQUEST: &str = "Bad Request";

/// Webhook response: a status code and a human-readable body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status_code: u16,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Build a response. Every pipeline outcome goes through here.
pub fn build(message: impl Into<String>, status_code: u16) -> Response {
    Response {
        status_code,
        body: message.into(),
    }
}

pub fn service_unavailable() -> Response {
    build(SERVICE_UNAVAILABLE, 503)
}

pub fn get_request() -> Response {
    build(GET_REQUEST, 200)
}

pub fn bad_request() -> Response {
    build(BAD_REQUEST, 200)
}
