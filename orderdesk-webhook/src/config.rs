//! Configuration module for environment variable parsing.
//!
//! All configuration is read once at startup and shared read-only between
//! requests. Nothing in the request path mutates it.

use std::env;
use tracing::warn;

use crate::webhook::WebhookLog;

/// Environment variable holding the OrderDesk store identifier.
pub const STORE_ID_VAR: &str = "FOXY_ORDERDESK_STORE_ID";

/// Environment variable holding the OrderDesk API key.
pub const API_KEY_VAR: &str = "FOXY_ORDERDESK_API_KEY";

/// Credentials required to talk to the OrderDesk datastore.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationCredentials {
    pub store_id: Option<String>,
    pub api_key: Option<String>,
}

impl IntegrationCredentials {
    pub fn new(store_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            store_id: Some(store_id.into()),
            api_key: Some(api_key.into()),
        }
    }

    /// Check that both credentials are present.
    ///
    /// Each missing credential is reported on its own before the result is
    /// computed, so operators can see both when both are absent.
    pub fn validate(&self, log: &dyn WebhookLog) -> bool {
        let store_id_set = is_present(&self.store_id);
        let api_key_set = is_present(&self.api_key);

        if !store_id_set {
            log.credential_missing(STORE_ID_VAR);
        }
        if !api_key_set {
            log.credential_missing(API_KEY_VAR);
        }

        store_id_set && api_key_set
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// OrderDesk store id and API key
    pub credentials: IntegrationCredentials,

    /// Key Foxy uses to sign webhook bodies (HMAC-SHA256)
    pub webhook_encryption_key: Option<String>,

    /// Base URL of the OrderDesk REST API
    pub orderdesk_api_url: String,

    /// HTTP request timeout in milliseconds for OrderDesk calls
    pub request_timeout_ms: u64,

    /// Item codes that are never checked against OrderDesk inventory
    pub skip_inventory_codes: Option<Vec<String>>,

    /// Port for the web server to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            credentials: IntegrationCredentials::default(),
            webhook_encryption_key: None,
            orderdesk_api_url: "https://app.orderdesk.me/api/v2".to_string(),
            request_timeout_ms: 8000,
            skip_inventory_codes: None,
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            credentials: IntegrationCredentials {
                store_id: parse_secret(STORE_ID_VAR),
                api_key: parse_secret(API_KEY_VAR),
            },

            webhook_encryption_key: parse_secret("FOXY_WEBHOOK_ENCRYPTION_KEY"),

            orderdesk_api_url: parse_secret("FOXY_ORDERDESK_API_URL")
                .unwrap_or(defaults.orderdesk_api_url),

            request_timeout_ms: parse_number("REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),

            skip_inventory_codes: parse_csv("FOXY_SKIP_INVENTORY_CODES"),

            port: parse_number("PORT", defaults.port),
        }
    }
}

fn is_present(value: &Option<String>) -> bool {
    value.as_ref().map(|v| !v.is_empty()).unwrap_or(false)
}

/// Read a variable, treating empty or blank values as unset.
fn parse_secret(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_number<T: std::str::FromStr>(name: &str, default: T) -> T {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid number, using default");
            default
        }
    }
}

/// Parse a comma-separated list of strings.
fn parse_csv(name: &str) -> Option<Vec<String>> {
    env::var(name).ok().map(|raw| {
        raw.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
}
