//! Lifecycle commands and records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{CustomerId, ItemId, OrderId, PurchaseId, SupplierId};

/// Command to sell units of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrder {
    /// Item being sold.
    pub item_id: ItemId,
    /// Units sold, must be positive.
    pub quantity: i32,
    /// Optional buyer.
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
}

/// Command to cancel an order and return its units to stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrder {
    /// Order to cancel.
    pub order_id: OrderId,
}

/// Command to record a restock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePurchase {
    /// Item being restocked.
    pub item_id: ItemId,
    /// Units received, must be positive.
    pub quantity: i32,
    /// Optional source.
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
}

/// A sales order.
///
/// `quantity` and `order_date` never change after creation. `invoiced` only
/// ever moves from `false` to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Identity.
    pub id: OrderId,
    /// Item sold.
    pub item_id: ItemId,
    /// Buyer, if recorded.
    pub customer_id: Option<CustomerId>,
    /// Units sold.
    pub quantity: i32,
    /// When the order was placed.
    pub order_date: DateTime<Utc>,
    /// Whether the order has been frozen into an invoice.
    pub invoiced: bool,
}

/// A restock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    /// Identity.
    pub id: PurchaseId,
    /// Item restocked.
    pub item_id: ItemId,
    /// Source, if recorded.
    pub supplier_id: Option<SupplierId>,
    /// Units received.
    pub quantity: i32,
    /// When the purchase was recorded.
    pub purchase_date: DateTime<Utc>,
}

/// Outcome of a successful cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancellation {
    /// The order as it was before deletion.
    pub order: Order,
    /// Units returned to stock.
    pub restored_quantity: i32,
    /// Item quantity after the units were returned.
    pub item_quantity: i32,
}

/// Filters for listing orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilter {
    /// Only orders for this item.
    #[serde(default)]
    pub item_id: Option<ItemId>,
    /// Only orders for this customer.
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    /// Only orders with this invoiced flag.
    #[serde(default)]
    pub invoiced: Option<bool>,
}

/// Filters for listing purchases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseFilter {
    /// Only purchases for this item.
    #[serde(default)]
    pub item_id: Option<ItemId>,
    /// Only purchases from this supplier.
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
}
