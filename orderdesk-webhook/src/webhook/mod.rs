//! Webhook request pipeline.
//!
//! ## Flow
//!
//! ```text
//! config check → GET probe → authenticity → body parse → dispatch → handler
//! ```
//!
//! Every stage may end the pipeline early; each outcome is a [`Response`].

pub mod auth;
pub mod dispatch;
pub mod events;
pub mod log;
pub mod request;
pub mod response;

use std::sync::Arc;

use tracing::debug;

use crate::config::IntegrationCredentials;

pub use auth::{AuthValidator, ErrorDescriptor};
pub use dispatch::{parse_body, EventDispatcher, EventHandlers, PayloadError};
pub use events::WebhookEvent;
pub use log::{TracingLog, WebhookLog};
pub use request::{IncomingRequest, EVENT_HEADER, SIGNATURE_HEADER};
pub use response::Response;

/// Validates, classifies and dispatches webhook requests.
///
/// Holds no per-request state; one instance serves concurrent requests.
#[derive(Clone)]
pub struct WebhookReceiver {
    credentials: IntegrationCredentials,
    validator: Arc<dyn AuthValidator>,
    dispatcher: EventDispatcher,
    log: Arc<dyn WebhookLog>,
}

impl WebhookReceiver {
    pub fn new(
        credentials: IntegrationCredentials,
        validator: Arc<dyn AuthValidator>,
        handlers: Arc<dyn EventHandlers>,
        log: Arc<dyn WebhookLog>,
    ) -> Self {
        Self {
            credentials,
            validator,
            dispatcher: EventDispatcher::new(handlers, log.clone()),
            log,
        }
    }

    pub async fn handle(&self, request: &IncomingRequest) -> Response {
        if !self.credentials.validate(self.log.as_ref()) {
            return response::service_unavailable();
        }

        if request.is_get() {
            self.log.get_probe();
            return response::get_request();
        }

        if let Some(error) = self.validator.get_error(request) {
            debug!(error = %error, "webhook_rejected");
            return response::build(error.message, 200);
        }

        let body = match parse_body(&request.body) {
            Ok(body) => body,
            Err(e) => {
                self.log.invalid_payload(request, &e);
                return response::bad_request();
            }
        };

        self.dispatcher.dispatch(request, body).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::dispatch::testing::RecordingHandlers;
    use super::log::testing::{LogEntry, RecordingLog};
    use super::*;
    use crate::config::{API_KEY_VAR, STORE_ID_VAR};

    /// Validator with a fixed verdict.
    struct StaticValidator(Option<ErrorDescriptor>);

    impl AuthValidator for StaticValidator {
        fn get_error(&self, _request: &IncomingRequest) -> Option<ErrorDescriptor> {
            self.0.clone()
        }
    }

    struct Harness {
        receiver: WebhookReceiver,
        handlers: Arc<RecordingHandlers>,
        log: Arc<RecordingLog>,
    }

    fn harness(credentials: IntegrationCredentials, verdict: Option<ErrorDescriptor>) -> Harness {
        let handlers = Arc::new(RecordingHandlers::default());
        let log = Arc::new(RecordingLog::default());
        let receiver = WebhookReceiver::new(
            credentials,
            Arc::new(StaticValidator(verdict)),
            handlers.clone(),
            log.clone(),
        );
        Harness {
            receiver,
            handlers,
            log,
        }
    }

    fn configured() -> IntegrationCredentials {
        IntegrationCredentials::new("store-1", "key-1")
    }

    fn post(event: &str, body: &str) -> IncomingRequest {
        IncomingRequest::new("POST", body).with_header("foxy-webhook-event", event)
    }

    #[tokio::test]
    async fn test_get_probe() {
        let h = harness(configured(), Some(ErrorDescriptor::new("never consulted")));
        let request = IncomingRequest::new("GET", "garbage")
            .with_header("foxy-webhook-event", "transaction/created");

        let response = h.receiver.handle(&request).await;

        assert_eq!(response, response::build("GET Request", 200));
        assert_eq!(h.log.entries(), vec![LogEntry::GetProbe]);
        assert!(h.handlers.transaction_created_calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_config_wins_over_valid_post() {
        let h = harness(IntegrationCredentials::default(), None);

        let response = h
            .receiver
            .handle(&post("transaction/created", r#"{"id":1}"#))
            .await;

        assert_eq!(response.status_code, 503);
        assert_eq!(response.body, "Service Unavailable. Check the webhook error logs.");
        assert!(h.handlers.transaction_created_calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_config_wins_over_get() {
        let h = harness(IntegrationCredentials::default(), None);

        let response = h.receiver.handle(&IncomingRequest::new("GET", "")).await;

        assert_eq!(response, response::service_unavailable());
        assert!(!h.log.entries().contains(&LogEntry::GetProbe));
    }

    #[tokio::test]
    async fn test_missing_api_key_only() {
        let credentials = IntegrationCredentials {
            store_id: Some("store-1".to_string()),
            api_key: None,
        };
        let h = harness(credentials, None);

        let response = h.receiver.handle(&post("validation/payment", "{}")).await;

        assert_eq!(response, response::service_unavailable());
        assert_eq!(
            h.log.entries(),
            vec![LogEntry::CredentialMissing(API_KEY_VAR.to_string())]
        );
    }

    #[tokio::test]
    async fn test_both_credentials_missing_logged_separately() {
        let h = harness(IntegrationCredentials::default(), None);

        h.receiver.handle(&post("validation/payment", "{}")).await;

        assert_eq!(
            h.log.entries(),
            vec![
                LogEntry::CredentialMissing(STORE_ID_VAR.to_string()),
                LogEntry::CredentialMissing(API_KEY_VAR.to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_rejected_request_returns_validator_message() {
        let h = harness(
            configured(),
            Some(ErrorDescriptor::new("Invalid webhook signature")),
        );

        let response = h
            .receiver
            .handle(&post("transaction/created", r#"{"id":1}"#))
            .await;

        assert_eq!(response, response::build("Invalid webhook signature", 200));
        assert!(h.handlers.transaction_created_calls().is_empty());
    }

    #[tokio::test]
    async fn test_pre_payment_dispatch() {
        let h = harness(configured(), None);

        let response = h
            .receiver
            .handle(&post("validation/payment", r#"{"amount":10}"#))
            .await;

        assert_eq!(response, h.handlers.pre_payment_response);
        assert_eq!(h.handlers.pre_payment_calls(), vec![json!({"amount": 10})]);
        assert!(h.handlers.transaction_created_calls().is_empty());
    }

    #[tokio::test]
    async fn test_transaction_created_dispatch() {
        let h = harness(configured(), None);

        let response = h
            .receiver
            .handle(&post("transaction/created", r#"{"id":42}"#))
            .await;

        assert_eq!(response, h.handlers.transaction_created_response);
        assert_eq!(h.handlers.transaction_created_calls(), vec![json!({"id": 42})]);
        assert!(h.handlers.pre_payment_calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_event() {
        let h = harness(configured(), None);
        let request = post("customer/updated", "{}");

        let response = h.receiver.handle(&request).await;

        assert_eq!(response, response::build("Bad Request", 200));
        assert_eq!(
            h.log.entries(),
            vec![LogEntry::UnrecognizedEvent {
                request: request.clone(),
                event: Some("customer/updated".to_string()),
            }]
        );
    }

    #[tokio::test]
    async fn test_other_methods_follow_post_path() {
        let h = harness(configured(), None);
        let request = IncomingRequest::new("PUT", r#"{"id":7}"#)
            .with_header("foxy-webhook-event", "transaction/created");

        let response = h.receiver.handle(&request).await;

        assert_eq!(response, h.handlers.transaction_created_response);
        assert_eq!(h.handlers.transaction_created_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let h = harness(configured(), None);

        let response = h
            .receiver
            .handle(&post("transaction/created", "{not json"))
            .await;

        assert_eq!(response, response::bad_request());
        assert_eq!(h.log.entries(), vec![LogEntry::InvalidPayload]);
        assert!(h.handlers.transaction_created_calls().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_requests_are_identical() {
        let h = harness(configured(), None);
        let request = post("validation/payment", r#"{"amount":10}"#);

        let first = h.receiver.handle(&request).await;
        let second = h.receiver.handle(&request).await;

        assert_eq!(first, second);
        assert_eq!(h.handlers.pre_payment_calls().len(), 2);
    }
}
