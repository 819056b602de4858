//! Event handlers backed by OrderDesk.
//!
//! - `validation/payment`: check the cart against OrderDesk inventory and
//!   answer with Foxy's pre-payment document `{"ok": bool, "details": string}`
//! - `transaction/created`: create the order in OrderDesk

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use super::client::OrderDeskApi;
use super::types::{FoxyCart, FoxyTransaction, OrderDeskOrder};
use crate::webhook::response::{self, Response};
use crate::webhook::EventHandlers;

const INTERNAL_ERROR: &str = "Internal Server Error";

#[derive(Clone)]
pub struct OrderDeskHandlers {
    api: Arc<dyn OrderDeskApi>,
    skip_inventory_codes: HashSet<String>,
}

impl OrderDeskHandlers {
    pub fn new(api: Arc<dyn OrderDeskApi>, skip_inventory_codes: Option<Vec<String>>) -> Self {
        Self {
            api,
            skip_inventory_codes: skip_inventory_codes.unwrap_or_default().into_iter().collect(),
        }
    }

    /// Quantities requested per item code, with a display name for each.
    /// Quantities are summed as `u64` so repeated lines cannot wrap.
    fn requested_quantities(&self, cart: &FoxyCart) -> BTreeMap<String, (String, u64)> {
        let mut requested: BTreeMap<String, (String, u64)> = BTreeMap::new();

        for item in &cart.embedded.items {
            if item.code.is_empty() || self.skip_inventory_codes.contains(&item.code) {
                continue;
            }
            let entry = requested
                .entry(item.code.clone())
                .or_insert_with(|| (item.name.clone(), 0));
            entry.1 = entry.1.saturating_add(u64::from(item.quantity));
        }

        requested
    }
}

/// Negative stock never satisfies a request.
fn in_stock(stock: i64, quantity: u64) -> bool {
    u64::try_from(stock).map_or(false, |stock| stock >= quantity)
}

fn pre_payment_response(problems: &[String]) -> Response {
    let body = json!({
        "ok": problems.is_empty(),
        "details": problems.join("; "),
    });
    response::build(body.to_string(), 200)
}

#[async_trait]
impl EventHandlers for OrderDeskHandlers {
    async fn pre_payment(&self, body: Value) -> Response {
        let cart: FoxyCart = match serde_json::from_value(body) {
            Ok(cart) => cart,
            Err(e) => {
                warn!(error = %e, "pre_payment_invalid_cart");
                return response::bad_request();
            }
        };

        let requested = self.requested_quantities(&cart);
        info!(
            items = cart.embedded.items.len(),
            checked_codes = requested.len(),
            "pre_payment_start"
        );

        let lookups = join_all(
            requested
                .keys()
                .map(|code| self.api.find_inventory_item(code)),
        )
        .await;

        let mut problems = Vec::new();
        for ((code, (name, quantity)), lookup) in requested.iter().zip(lookups) {
            match lookup {
                Ok(Some(item)) if in_stock(item.stock, *quantity) => {}
                Ok(Some(item)) => {
                    problems.push(format!(
                        "Only {} of {} ({}) in stock",
                        item.stock.max(0),
                        name,
                        code
                    ));
                }
                Ok(None) => problems.push(format!("{} ({}) is not available", name, code)),
                Err(e) => {
                    error!(code = %code, error = %e, "pre_payment_inventory_lookup_failed");
                    return response::build(INTERNAL_ERROR, 500);
                }
            }
        }

        info!(ok = problems.is_empty(), problems = problems.len(), "pre_payment_complete");
        pre_payment_response(&problems)
    }

    async fn transaction_created(&self, body: Value) -> Response {
        let transaction: FoxyTransaction = match serde_json::from_value(body) {
            Ok(transaction) => transaction,
            Err(e) => {
                warn!(error = %e, "transaction_created_invalid_payload");
                return response::bad_request();
            }
        };

        let order = OrderDeskOrder::from(&transaction);

        match self.api.create_order(&order).await {
            Ok(()) => {
                info!(transaction_id = transaction.id, "transaction_created_complete");
                response::build("Order created", 200)
            }
            Err(e) => {
                error!(
                    transaction_id = transaction.id,
                    error = %e,
                    "transaction_created_order_failed"
                );
                response::build(INTERNAL_ERROR, 500)
            }
        }
    }
}
