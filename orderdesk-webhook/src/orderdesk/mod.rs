//! OrderDesk datastore integration.
//!
//! Supplies the concrete [`EventHandlers`](crate::webhook::EventHandlers)
//! the receiver dispatches to.

pub mod client;
pub mod handlers;
pub mod types;

pub use client::{OrderDeskApi, OrderDeskClient, OrderDeskError};
pub use handlers::OrderDeskHandlers;
pub use types::{FoxyCart, FoxyTransaction, InventoryItem, OrderDeskOrder};
