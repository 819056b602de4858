//! Foxy webhook payloads and OrderDesk API documents.
//!
//! Only the fields the integration reads are modelled; everything else in the
//! Foxy payload is ignored.

use serde::{Deserialize, Serialize};

// =============================================================================
// Foxy payloads
// =============================================================================

/// Embedded resources of a Foxy cart or transaction (HAL `_embedded`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoxyEmbedded {
    #[serde(default, rename = "fx:items")]
    pub items: Vec<FoxyItem>,
    #[serde(default, rename = "fx:shipments")]
    pub shipments: Vec<FoxyShipment>,
}

/// Cart sent with `validation/payment`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoxyCart {
    #[serde(default, rename = "_embedded")]
    pub embedded: FoxyEmbedded,
}

/// Transaction sent with `transaction/created`.
#[derive(Debug, Clone, Deserialize)]
pub struct FoxyTransaction {
    pub id: u64,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub total_order: f64,
    #[serde(default)]
    pub total_shipping: f64,
    #[serde(default, rename = "_embedded")]
    pub embedded: FoxyEmbedded,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FoxyItem {
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub code: String,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FoxyShipment {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
}

// =============================================================================
// OrderDesk documents
// =============================================================================

/// Order body for `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDeskOrder {
    pub source_id: String,
    pub email: String,
    pub order_total: f64,
    pub shipping_total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<OrderDeskAddress>,
    pub order_items: Vec<OrderDeskItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDeskItem {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDeskAddress {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// Envelope of `GET /inventory-items`.
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub inventory_items: Vec<InventoryItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InventoryItem {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stock: i64,
}

impl From<&FoxyItem> for OrderDeskItem {
    fn from(item: &FoxyItem) -> Self {
        OrderDeskItem {
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
            code: item.code.clone(),
        }
    }
}

impl From<&FoxyShipment> for OrderDeskAddress {
    fn from(shipment: &FoxyShipment) -> Self {
        OrderDeskAddress {
            first_name: shipment.first_name.clone(),
            last_name: shipment.last_name.clone(),
            company: shipment.company.clone(),
            address1: shipment.address1.clone(),
            address2: shipment.address2.clone(),
            city: shipment.city.clone(),
            state: shipment.region.clone(),
            postal_code: shipment.postal_code.clone(),
            country: shipment.country.clone(),
        }
    }
}

impl From<&FoxyTransaction> for OrderDeskOrder {
    fn from(transaction: &FoxyTransaction) -> Self {
        OrderDeskOrder {
            source_id: transaction.id.to_string(),
            email: transaction.customer_email.clone(),
            order_total: transaction.total_order,
            shipping_total: transaction.total_shipping,
            shipping: transaction.embedded.shipments.first().map(OrderDeskAddress::from),
            order_items: transaction
                .embedded
                .items
                .iter()
                .map(OrderDeskItem::from)
                .collect(),
        }
    }
}
