//! HTTP client for the OrderDesk REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use super::types::{InventoryItem, InventoryResponse, OrderDeskOrder};
use crate::config::IntegrationCredentials;

const STORE_ID_HEADER: &str = "ORDERDESK-STORE-ID";
const API_KEY_HEADER: &str = "ORDERDESK-API-KEY";

#[derive(Debug, Error)]
pub enum OrderDeskError {
    #[error("invalid OrderDesk API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("OrderDesk request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OrderDesk responded with status {status}: {message}")]
    Status { status: u16, message: String },
}

/// Operations the webhook handlers need from OrderDesk.
#[async_trait]
pub trait OrderDeskApi: Send + Sync {
    async fn create_order(&self, order: &OrderDeskOrder) -> Result<(), OrderDeskError>;

    /// Look up an inventory item by its code. `None` when OrderDesk has none.
    async fn find_inventory_item(&self, code: &str) -> Result<Option<InventoryItem>, OrderDeskError>;
}

#[derive(Debug, Clone)]
pub struct OrderDeskClient {
    http: Client,
    base_url: Url,
    store_id: String,
    api_key: String,
}

impl OrderDeskClient {
    pub fn new(
        base_url: &str,
        credentials: &IntegrationCredentials,
        timeout_ms: u64,
    ) -> Result<Self, OrderDeskError> {
        // Url::join drops the last segment unless the base ends with '/'
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{}/", base_url))?
        };

        let http = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;

        Ok(Self {
            http,
            base_url,
            store_id: credentials.store_id.clone().unwrap_or_default(),
            api_key: credentials.api_key.clone().unwrap_or_default(),
        })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, OrderDeskError> {
        Ok(self.base_url.join(path)?)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(STORE_ID_HEADER, &self.store_id)
            .header(API_KEY_HEADER, &self.api_key)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, OrderDeskError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(OrderDeskError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl OrderDeskApi for OrderDeskClient {
    async fn create_order(&self, order: &OrderDeskOrder) -> Result<(), OrderDeskError> {
        let url = self.endpoint("orders")?;
        debug!(url = %url, source_id = %order.source_id, "orderdesk_create_order");

        let response = self
            .authorized(self.http.post(url))
            .json(order)
            .send()
            .await?;
        check_status(response).await?;

        info!(
            source_id = %order.source_id,
            items = order.order_items.len(),
            "orderdesk_order_created"
        );
        Ok(())
    }

    async fn find_inventory_item(&self, code: &str) -> Result<Option<InventoryItem>, OrderDeskError> {
        let url = self.endpoint("inventory-items")?;
        debug!(url = %url, code = %code, "orderdesk_find_inventory_item");

        let response = self
            .authorized(self.http.get(url))
            .query(&[("code", code)])
            .send()
            .await?;
        let inventory: InventoryResponse = check_status(response).await?.json().await?;

        Ok(inventory
            .inventory_items
            .into_iter()
            .find(|item| item.code == code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> IntegrationCredentials {
        IntegrationCredentials::new("store-1", "key-1")
    }

    #[test]
    fn test_endpoint_keeps_api_version() {
        let client = OrderDeskClient::new("https://app.orderdesk.me/api/v2", &credentials(), 1000)
            .unwrap();

        assert_eq!(
            client.endpoint("orders").unwrap().as_str(),
            "https://app.orderdesk.me/api/v2/orders"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash() {
        let client = OrderDeskClient::new("http://localhost:9000/api/", &credentials(), 1000)
            .unwrap();

        assert_eq!(
            client.endpoint("inventory-items").unwrap().as_str(),
            "http://localhost:9000/api/inventory-items"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = OrderDeskClient::new("not a url", &credentials(), 1000);
        assert!(matches!(result, Err(OrderDeskError::InvalidUrl(_))));
    }

    #[test]
    fn test_missing_credentials_become_empty() {
        let client = OrderDeskClient::new(
            "https://app.orderdesk.me/api/v2",
            &IntegrationCredentials::default(),
            1000,
        )
        .unwrap();

        assert_eq!(client.store_id, "");
        assert_eq!(client.api_key, "");
    }
}
