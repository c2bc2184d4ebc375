//! Order repository.
//!
//! Creating an order takes its units out of stock; cancelling deletes it and
//! puts them back. Both run as one transaction with the stock write.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, TransactionTrait,
};
use stockbook_core::lifecycle::{
    CancelOrder, CreateOrder, LifecycleService, Order, OrderCancellation, OrderFilter,
};
use stockbook_core::{EntityKind, InventoryError};
use stockbook_shared::types::{OrderId, PageRequest, PageResponse};
use tracing::{info, warn};

use super::item::find_item_in;
use super::party::find_customer_in;
use super::stock::apply_movement_in;
use crate::entities::orders;
use crate::error::RepositoryError;
use crate::unit_of_work::{finish, with_retry, DEFAULT_MAX_ATTEMPTS};

/// Loads an order or fails with `NotFound`.
pub(crate) async fn find_order_in<C>(conn: &C, order_id: OrderId) -> Result<Order, RepositoryError>
where
    C: ConnectionTrait,
{
    orders::Entity::find_by_id(order_id.into_inner())
        .one(conn)
        .await?
        .map(Order::from)
        .ok_or_else(|| InventoryError::not_found(EntityKind::Order, order_id).into())
}

/// Order repository for the sales side of the stock ledger.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    db: DatabaseConnection,
    max_attempts: u32,
}

impl OrderRepository {
    /// Creates a new order repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the number of attempts for transient failures.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sells `cmd.quantity` units of an item.
    ///
    /// The order insert and the stock decrement commit together or not at all.
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity` if the quantity is not positive
    /// - `NotFound` if the item or customer does not exist
    /// - `InsufficientStock` if the item cannot cover the order
    pub async fn create_order(&self, cmd: CreateOrder) -> Result<Order, InventoryError> {
        LifecycleService::validate_quantity(cmd.quantity)?;

        let result = with_retry("create_order", self.max_attempts, move || async move {
            let txn = self.db.begin().await?;
            let result = create_order_in(&txn, cmd).await;
            finish(txn, result).await
        })
        .await;

        match &result {
            Ok(order) => info!(
                order_id = %order.id,
                item_id = %order.item_id,
                quantity = order.quantity,
                "order created"
            ),
            Err(err @ InventoryError::InsufficientStock { .. }) => {
                warn!(item_id = %cmd.item_id, quantity = cmd.quantity, error = %err, "order rejected");
            }
            Err(_) => {}
        }
        result
    }

    /// Cancels an order and returns its units to stock.
    ///
    /// A second cancel of the same order fails with `NotFound`; stock is never
    /// credited twice.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the order does not exist
    /// - `AlreadyInvoiced` if the order is part of an invoice
    pub async fn cancel_order(&self, cmd: CancelOrder) -> Result<OrderCancellation, InventoryError> {
        let cancellation = with_retry("cancel_order", self.max_attempts, move || async move {
            let txn = self.db.begin().await?;
            let result = cancel_order_in(&txn, cmd).await;
            finish(txn, result).await
        })
        .await?;

        info!(
            order_id = %cancellation.order.id,
            item_id = %cancellation.order.item_id,
            restored = cancellation.restored_quantity,
            quantity = cancellation.item_quantity,
            "order cancelled"
        );
        Ok(cancellation)
    }

    /// Finds an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the order does not exist.
    pub async fn get_order(&self, order_id: OrderId) -> Result<Order, InventoryError> {
        Ok(find_order_in(&self.db, order_id).await?)
    }

    /// Lists orders newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_orders(
        &self,
        filter: OrderFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Order>, InventoryError> {
        let query = orders::Entity::find()
            .apply_if(filter.item_id, |q, id| {
                q.filter(orders::Column::ItemId.eq(id.into_inner()))
            })
            .apply_if(filter.customer_id, |q, id| {
                q.filter(orders::Column::CustomerId.eq(id.into_inner()))
            })
            .apply_if(filter.invoiced, |q, invoiced| {
                q.filter(orders::Column::Invoiced.eq(invoiced))
            });

        let total = query
            .clone()
            .count(&self.db)
            .await
            .map_err(RepositoryError::from)?;

        let rows = query
            .order_by_desc(orders::Column::OrderDate)
            .order_by_desc(orders::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(RepositoryError::from)?;

        Ok(PageResponse::new(
            rows.into_iter().map(Order::from).collect(),
            page,
            total,
        ))
    }
}

async fn create_order_in<C>(conn: &C, cmd: CreateOrder) -> Result<Order, RepositoryError>
where
    C: ConnectionTrait,
{
    let item = find_item_in(conn, cmd.item_id).await?;
    if let Some(customer_id) = cmd.customer_id {
        find_customer_in(conn, customer_id).await?;
    }

    let (order, movement) = LifecycleService::plan_order(&cmd, &item, Utc::now())?;

    apply_movement_in(conn, item.id, movement).await?;
    orders::ActiveModel::from(&order).insert(conn).await?;

    Ok(order)
}

async fn cancel_order_in<C>(conn: &C, cmd: CancelOrder) -> Result<OrderCancellation, RepositoryError>
where
    C: ConnectionTrait,
{
    let order = find_order_in(conn, cmd.order_id).await?;
    cancel_loaded_in(conn, order).await
}

/// Deletes `order` as read and restores its units.
///
/// The delete only matches the row while it is still uninvoiced, so an `order`
/// read before a concurrent cancel or invoice fails with a retryable conflict.
pub(crate) async fn cancel_loaded_in<C>(
    conn: &C,
    order: Order,
) -> Result<OrderCancellation, RepositoryError>
where
    C: ConnectionTrait,
{
    let movement = LifecycleService::plan_cancel(&order)?;

    let deleted = orders::Entity::delete_many()
        .filter(orders::Column::Id.eq(order.id.into_inner()))
        .filter(orders::Column::Invoiced.eq(false))
        .exec(conn)
        .await?;
    if deleted.rows_affected == 0 {
        return Err(InventoryError::conflict(format!("order {} changed concurrently", order.id)).into());
    }

    let item_quantity = apply_movement_in(conn, order.item_id, movement).await?;

    Ok(OrderCancellation {
        order,
        restored_quantity: movement.quantity(),
        item_quantity,
    })
}

#[cfg(test)]
#[path = "order_tests.rs"]
mod tests;
