//! Stock-keeping items.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{ItemId, Money};

use crate::error::InventoryError;

/// Largest unit price the `items.price` column (`DECIMAL(12, 2)`) can hold.
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Input for creating an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Opening stock.
    #[serde(default)]
    pub quantity: i32,
    /// Unit price.
    pub price: Decimal,
}

/// A stock-keeping item. `quantity` is the ledger balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identity.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Units on hand, never negative.
    pub quantity: i32,
    /// Unit price.
    pub price: Money,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Validates `input` and builds a new item.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the trimmed name is empty
    /// - `InvalidQuantity` if the opening stock is negative
    /// - `InvalidPrice` if the price is negative or rounds above [`MAX_PRICE`]
    pub fn create(input: NewItem, now: DateTime<Utc>) -> Result<Self, InventoryError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(InventoryError::InvalidInput(
                "item name cannot be empty".to_string(),
            ));
        }
        if input.quantity < 0 {
            return Err(InventoryError::InvalidQuantity(input.quantity));
        }
        if input.price.is_sign_negative() && !input.price.is_zero() {
            return Err(InventoryError::InvalidPrice(input.price));
        }
        let price = Money::new(input.price);
        if price.amount() > MAX_PRICE {
            return Err(InventoryError::InvalidPrice(input.price));
        }

        Ok(Self {
            id: ItemId::new(),
            name: name.to_string(),
            description: input
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            quantity: input.quantity,
            price,
            created_at: now,
        })
    }

    /// Value of the units on hand at the unit price.
    #[must_use]
    pub fn stock_value(&self) -> Money {
        self.price.times(i64::from(self.quantity))
    }
}
