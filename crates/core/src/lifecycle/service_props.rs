//! Property-based tests for LifecycleService.
//!
//! - Orders are accepted exactly when the item can cover them
//! - Cancelling an accepted order plans a reversal of the same size

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::LifecycleService;
use super::types::CreateOrder;
use crate::catalog::{Item, NewItem};
use crate::error::InventoryError;
use crate::stock::StockMovement;

fn item_with(quantity: i32, price_cents: i64) -> Item {
    Item::create(
        NewItem {
            name: "Widget".to_string(),
            description: None,
            quantity,
            price: Decimal::new(price_cents, 2),
        },
        Utc::now(),
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_order_accepted_iff_stock_covers_it(
        stock in 0i32..200,
        quantity in -5i32..250,
        price_cents in 0i64..100_000,
    ) {
        let item = item_with(stock, price_cents);
        let cmd = CreateOrder { item_id: item.id, quantity, customer_id: None };
        let result = LifecycleService::plan_order(&cmd, &item, Utc::now());

        if quantity <= 0 {
            prop_assert_eq!(result.unwrap_err(), InventoryError::InvalidQuantity(quantity));
        } else if quantity > stock {
            let is_insufficient = matches!(
                result,
                Err(InventoryError::InsufficientStock { available, .. }) if available == stock
            );
            prop_assert!(is_insufficient);
        } else {
            let (order, movement) = result.unwrap();
            prop_assert_eq!(movement.delta(), -quantity);
            prop_assert!(!order.invoiced);

            let reversal = LifecycleService::plan_cancel(&order).unwrap();
            prop_assert_eq!(reversal, StockMovement::SaleReversal(quantity));
            prop_assert_eq!(movement.delta() + reversal.delta(), 0);
        }
    }
}
