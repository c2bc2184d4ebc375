//! Lifecycle service for orders and purchases.
//!
//! Decides whether a command may proceed and which stock movement it implies.
//! The persistence layer executes the plan inside one transaction.

use chrono::{DateTime, Utc};
use stockbook_shared::types::{OrderId, PurchaseId};

use crate::catalog::Item;
use crate::error::InventoryError;
use crate::lifecycle::types::{CreateOrder, CreatePurchase, Order, Purchase};
use crate::stock::{StockLedger, StockMovement};

/// Stateless service for order and purchase commands.
pub struct LifecycleService;

impl LifecycleService {
    /// Checks that a requested quantity is a positive count.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` for zero or negative values.
    pub fn validate_quantity(quantity: i32) -> Result<(), InventoryError> {
        if quantity <= 0 {
            return Err(InventoryError::InvalidQuantity(quantity));
        }
        Ok(())
    }

    /// Plan a sale of `cmd.quantity` units of `item`.
    ///
    /// # Arguments
    /// * `cmd` - The order command
    /// * `item` - The item as currently stored
    /// * `now` - Order date to stamp on the new record
    ///
    /// # Returns
    /// The order to insert and the movement to apply to the item.
    ///
    /// # Errors
    /// * `InvalidQuantity` if the quantity is not positive
    /// * `InsufficientStock` if the item holds fewer units than requested
    pub fn plan_order(
        cmd: &CreateOrder,
        item: &Item,
        now: DateTime<Utc>,
    ) -> Result<(Order, StockMovement), InventoryError> {
        Self::validate_quantity(cmd.quantity)?;

        let movement = StockMovement::Sale(cmd.quantity);
        StockLedger::apply(item.id, item.quantity, movement)?;

        let order = Order {
            id: OrderId::new(),
            item_id: item.id,
            customer_id: cmd.customer_id,
            quantity: cmd.quantity,
            order_date: now,
            invoiced: false,
        };

        Ok((order, movement))
    }

    /// Plan the cancellation of `order`.
    ///
    /// # Errors
    /// * `AlreadyInvoiced` if the order has been frozen into an invoice
    pub fn plan_cancel(order: &Order) -> Result<StockMovement, InventoryError> {
        if order.invoiced {
            return Err(InventoryError::AlreadyInvoiced(order.id));
        }
        Ok(StockMovement::SaleReversal(order.quantity))
    }

    /// Plan a restock of `cmd.quantity` units of `item`.
    ///
    /// # Errors
    /// * `InvalidQuantity` if the quantity is not positive or would overflow
    ///   the item's balance
    pub fn plan_purchase(
        cmd: &CreatePurchase,
        item: &Item,
        now: DateTime<Utc>,
    ) -> Result<(Purchase, StockMovement), InventoryError> {
        Self::validate_quantity(cmd.quantity)?;

        let movement = StockMovement::Restock(cmd.quantity);
        StockLedger::apply(item.id, item.quantity, movement)?;

        let purchase = Purchase {
            id: PurchaseId::new(),
            item_id: item.id,
            supplier_id: cmd.supplier_id,
            quantity: cmd.quantity,
            purchase_date: now,
        };

        Ok((purchase, movement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NewItem;
    use rust_decimal_macros::dec;
    use stockbook_shared::types::{CustomerId, SupplierId};

    fn item(quantity: i32) -> Item {
        Item::create(
            NewItem {
                name: "Widget".to_string(),
                description: None,
                quantity,
                price: dec!(5.00),
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_validate_quantity() {
        assert!(LifecycleService::validate_quantity(1).is_ok());
        assert_eq!(
            LifecycleService::validate_quantity(0),
            Err(InventoryError::InvalidQuantity(0))
        );
        assert_eq!(
            LifecycleService::validate_quantity(-3),
            Err(InventoryError::InvalidQuantity(-3))
        );
    }

    #[test]
    fn test_plan_order_within_stock() {
        let item = item(10);
        let customer = CustomerId::new();
        let cmd = CreateOrder {
            item_id: item.id,
            quantity: 4,
            customer_id: Some(customer),
        };
        let (order, movement) = LifecycleService::plan_order(&cmd, &item, Utc::now()).unwrap();

        assert_eq!(movement, StockMovement::Sale(4));
        assert_eq!(order.item_id, item.id);
        assert_eq!(order.customer_id, Some(customer));
        assert_eq!(order.quantity, 4);
        assert!(!order.invoiced);
    }

    #[test]
    fn test_plan_order_insufficient_stock() {
        let item = item(6);
        let cmd = CreateOrder {
            item_id: item.id,
            quantity: 10,
            customer_id: None,
        };
        let err = LifecycleService::plan_order(&cmd, &item, Utc::now()).unwrap_err();
        assert_eq!(
            err,
            InventoryError::InsufficientStock {
                item_id: item.id,
                requested: 10,
                available: 6,
            }
        );
    }

    #[test]
    fn test_plan_order_zero_quantity() {
        let item = item(10);
        let cmd = CreateOrder {
            item_id: item.id,
            quantity: 0,
            customer_id: None,
        };
        let err = LifecycleService::plan_order(&cmd, &item, Utc::now()).unwrap_err();
        assert_eq!(err, InventoryError::InvalidQuantity(0));
    }

    #[test]
    fn test_plan_cancel() {
        let item = item(10);
        let cmd = CreateOrder {
            item_id: item.id,
            quantity: 4,
            customer_id: None,
        };
        let (mut order, _) = LifecycleService::plan_order(&cmd, &item, Utc::now()).unwrap();

        assert_eq!(
            LifecycleService::plan_cancel(&order).unwrap(),
            StockMovement::SaleReversal(4)
        );

        order.invoiced = true;
        assert_eq!(
            LifecycleService::plan_cancel(&order),
            Err(InventoryError::AlreadyInvoiced(order.id))
        );
    }

    #[test]
    fn test_plan_purchase() {
        let item = item(10);
        let supplier = SupplierId::new();
        let cmd = CreatePurchase {
            item_id: item.id,
            quantity: 20,
            supplier_id: Some(supplier),
        };
        let (purchase, movement) =
            LifecycleService::plan_purchase(&cmd, &item, Utc::now()).unwrap();

        assert_eq!(movement, StockMovement::Restock(20));
        assert_eq!(purchase.supplier_id, Some(supplier));
        assert_eq!(purchase.quantity, 20);
    }

    #[test]
    fn test_plan_purchase_rejects_non_positive() {
        let item = item(10);
        let cmd = CreatePurchase {
            item_id: item.id,
            quantity: -5,
            supplier_id: None,
        };
        assert_eq!(
            LifecycleService::plan_purchase(&cmd, &item, Utc::now()).unwrap_err(),
            InventoryError::InvalidQuantity(-5)
        );
    }
}
