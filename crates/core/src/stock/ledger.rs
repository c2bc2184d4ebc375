//! Quantity arithmetic for stock movements.

use serde::{Deserialize, Serialize};
use stockbook_shared::types::ItemId;

use crate::error::InventoryError;

/// A signed change to an item's on-hand quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "quantity", rename_all = "snake_case")]
pub enum StockMovement {
    /// Units leave stock because an order was created.
    Sale(i32),
    /// Units enter stock because a purchase was recorded.
    Restock(i32),
    /// Units return to stock because an order was cancelled.
    SaleReversal(i32),
}

impl StockMovement {
    /// Returns the signed delta applied to the item quantity.
    #[must_use]
    pub const fn delta(&self) -> i32 {
        match self {
            Self::Sale(quantity) => -*quantity,
            Self::Restock(quantity) | Self::SaleReversal(quantity) => *quantity,
        }
    }

    /// Returns the unsigned number of units moved.
    #[must_use]
    pub const fn quantity(&self) -> i32 {
        match self {
            Self::Sale(quantity) | Self::Restock(quantity) | Self::SaleReversal(quantity) => {
                *quantity
            }
        }
    }
}

/// Stock ledger rules.
///
/// Stateless: the persistence layer holds the balance and calls in here to
/// decide whether a delta may be applied.
pub struct StockLedger;

impl StockLedger {
    /// Computes the quantity that results from applying `delta` to `current`.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientStock` (carrying `current` as the available
    /// quantity) if the result would be negative, and `InvalidQuantity` if the
    /// addition overflows.
    pub fn apply_delta(item_id: ItemId, current: i32, delta: i32) -> Result<i32, InventoryError> {
        let next = current
            .checked_add(delta)
            .ok_or(InventoryError::InvalidQuantity(delta))?;

        if next < 0 {
            return Err(InventoryError::InsufficientStock {
                item_id,
                requested: delta.saturating_neg(),
                available: current,
            });
        }

        Ok(next)
    }

    /// Applies a movement to `current`. See [`StockLedger::apply_delta`].
    ///
    /// # Errors
    ///
    /// Same as [`StockLedger::apply_delta`].
    pub fn apply(
        item_id: ItemId,
        current: i32,
        movement: StockMovement,
    ) -> Result<i32, InventoryError> {
        Self::apply_delta(item_id, current, movement.delta())
    }
}
