//! Routing of validated events to their handlers.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::events::WebhookEvent;
use super::log::WebhookLog;
use super::request::IncomingRequest;
use super::response::{self, Response};

/// The request body is not a JSON document.
#[derive(Debug, Error)]
#[error("request body is not valid JSON: {0}")]
pub struct PayloadError(#[from] serde_json::Error);

/// Parse the raw request body.
pub fn parse_body(body: &str) -> Result<Value, PayloadError> {
    Ok(serde_json::from_str(body)?)
}

/// Business logic run for each recognized event.
///
/// Implementations return a fully shaped [`Response`]; the dispatcher hands
/// it back untouched.
#[async_trait]
pub trait EventHandlers: Send + Sync {
    async fn pre_payment(&self, body: Value) -> Response;

    async fn transaction_created(&self, body: Value) -> Response;
}

/// Maps an event type to its handler, falling back to "Bad Request".
#[derive(Clone)]
pub struct EventDispatcher {
    handlers: Arc<dyn EventHandlers>,
    log: Arc<dyn WebhookLog>,
}

impl EventDispatcher {
    pub fn new(handlers: Arc<dyn EventHandlers>, log: Arc<dyn WebhookLog>) -> Self {
        Self { handlers, log }
    }

    pub async fn dispatch(&self, request: &IncomingRequest, body: Value) -> Response {
        let event_type = request.event_type();
        let event = WebhookEvent::from_header(event_type);
        debug!(event = %event, "webhook_dispatch");

        match event {
            WebhookEvent::PrePayment => self.handlers.pre_payment(body).await,
            WebhookEvent::TransactionCreated => self.handlers.transaction_created(body).await,
            WebhookEvent::Unknown => {
                self.log.unrecognized_event(request, event_type);
                response::bad_request()
            }
        }
    }
}
