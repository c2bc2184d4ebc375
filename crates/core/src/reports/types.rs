//! Report types.

use serde::{Deserialize, Serialize};
use stockbook_shared::types::{ItemId, Money};

use crate::lifecycle::{Order, Purchase};

/// An item whose stock has fallen below the low-stock threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockItem {
    /// The item.
    pub item_id: ItemId,
    /// Item name.
    pub name: String,
    /// Units on hand.
    pub quantity: i32,
}

/// A recent order with its item name and value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentOrder {
    /// The order.
    #[serde(flatten)]
    pub order: Order,
    /// Name of the ordered item.
    pub item_name: String,
    /// `quantity * price` at the item's current price.
    pub total: Money,
}

/// A recent purchase with its item name and value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentPurchase {
    /// The purchase.
    #[serde(flatten)]
    pub purchase: Purchase,
    /// Name of the restocked item.
    pub item_name: String,
    /// `quantity * price` at the item's current price.
    pub total: Money,
}

/// Inventory overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryReport {
    /// Number of items in the catalog.
    pub item_count: u64,
    /// Number of orders on record.
    pub order_count: u64,
    /// Number of purchases on record.
    pub purchase_count: u64,
    /// `Σ quantity × price` over all items.
    pub stock_value: Money,
    /// `Σ order.quantity × item.price` over all orders.
    pub sales_total: Money,
    /// `Σ purchase.quantity × item.price` over all purchases.
    pub purchases_total: Money,
    /// Threshold used for `low_stock`.
    pub low_stock_threshold: i32,
    /// Items below the threshold, lowest stock first.
    pub low_stock: Vec<LowStockItem>,
    /// Newest orders first.
    pub recent_orders: Vec<RecentOrder>,
    /// Newest purchases first.
    pub recent_purchases: Vec<RecentPurchase>,
}
