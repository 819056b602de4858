//! Webhook endpoint handlers.
//!
//! These handlers only translate between axum and the webhook pipeline; all
//! validation and dispatch happens in [`WebhookReceiver`].

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::orderdesk::{OrderDeskClient, OrderDeskError, OrderDeskHandlers};
use crate::web::signature::FoxySignatureValidator;
use crate::webhook::{IncomingRequest, Response, TracingLog, WebhookReceiver};
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub receiver: WebhookReceiver,
}

impl AppState {
    pub fn new(receiver: WebhookReceiver) -> Self {
        Self { receiver }
    }

    /// Wire the production collaborators: Foxy signature check, OrderDesk
    /// handlers and tracing-backed diagnostics.
    pub fn from_config(config: Config) -> Result<Self, OrderDeskError> {
        let client = OrderDeskClient::new(
            &config.orderdesk_api_url,
            &config.credentials,
            config.request_timeout_ms,
        )?;

        let receiver = WebhookReceiver::new(
            config.credentials.clone(),
            Arc::new(FoxySignatureValidator::new(
                config.webhook_encryption_key.clone(),
            )),
            Arc::new(OrderDeskHandlers::new(
                Arc::new(client),
                config.skip_inventory_codes.clone(),
            )),
            Arc::new(TracingLog),
        );

        Ok(Self::new(receiver))
    }
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or_else(|_| {
            warn!(status_code = self.status_code, "webhook_invalid_status_code");
            StatusCode::INTERNAL_SERVER_ERROR
        });
        (status, self.body).into_response()
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Foxy Webhook
// =============================================================================

/// Build the pipeline's view of an HTTP call.
///
/// Headers with non-visible-ASCII values are dropped; the body is read as
/// UTF-8, replacing invalid sequences.
pub fn incoming_request(method: &Method, headers: &HeaderMap, body: &[u8]) -> IncomingRequest {
    let mut request = IncomingRequest::new(method.as_str(), String::from_utf8_lossy(body));

    for (name, value) in headers {
        match value.to_str() {
            Ok(value) => request.insert_header(name.as_str(), value),
            Err(_) => warn!(header = %name, "webhook_header_not_ascii"),
        }
    }

    request
}

/// Foxy webhook endpoint. Accepts every method.
pub async fn foxy_webhook(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = incoming_request(&method, &headers, &body);

    info!(
        method = %request.http_method,
        event = request.event_type().unwrap_or(""),
        body_length = request.body.len(),
        "foxy_webhook_received"
    );

    let response = state.receiver.handle(&request).await;

    info!(
        method = %request.http_method,
        status_code = response.status_code,
        success = response.is_success(),
        "foxy_webhook_completed"
    );

    response
}
