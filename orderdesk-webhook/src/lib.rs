//! Foxy → OrderDesk webhook receiver.
//!
//! Authenticates inbound Foxy webhooks, checks that the OrderDesk integration
//! is configured, and dispatches each event to its handler.
//!
//! ## Architecture
//!
//! ```text
//! HTTP (web) → WebhookReceiver (webhook) → OrderDeskHandlers (orderdesk) → OrderDesk API
//! ```

pub mod config;
pub mod orderdesk;
pub mod web;
pub mod webhook;

// Re-export commonly used types
pub use config::{Config, IntegrationCredentials};
pub use web::AppState;
pub use webhook::{IncomingRequest, Response, WebhookEvent, WebhookReceiver};
