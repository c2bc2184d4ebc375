//! Order and purchase lifecycle.
//!
//! Orders take stock out when created and give it back when cancelled.
//! Purchases put stock in and cannot be cancelled.
//!
//! - `types` - Commands, records and list filters
//! - `service` - Validation and stock planning for each command

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::LifecycleService;
pub use types::{
    CancelOrder, CreateOrder, CreatePurchase, Order, OrderCancellation, OrderFilter, Purchase,
    PurchaseFilter,
};
