//! Web server module for receiving Foxy webhooks.
//!
//! This module provides a thin axum layer that:
//! - Converts each HTTP call into an [`IncomingRequest`](crate::webhook::IncomingRequest)
//! - Runs it through the [`WebhookReceiver`](crate::webhook::WebhookReceiver)
//! - Returns the resulting status code and plain-text body

pub mod handlers;
pub mod signature;

use axum::{
    routing::{any, get},
    Router,
};

pub use handlers::{foxy_webhook, health, AppState, HealthResponse};
pub use signature::{verify_foxy_signature, FoxySignatureValidator};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", any(foxy_webhook))
        .route("/webhook", any(foxy_webhook))
        .with_state(state)
}
