//! Stock ledger persistence.
//!
//! The only code that writes `items.quantity` after creation. The write is a
//! single conditional statement, `quantity = quantity + δ WHERE quantity >= -δ`
//! for decrements and `WHERE quantity <= i32::MAX - δ` for increments, so
//! concurrent writers can never both take the last units or overflow the column.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait,
};
use stockbook_core::stock::{StockLedger, StockMovement};
use stockbook_core::{EntityKind, InventoryError};
use stockbook_shared::types::ItemId;
use tracing::debug;

use crate::entities::items;
use crate::error::RepositoryError;
use crate::unit_of_work::{finish, with_retry, DEFAULT_MAX_ATTEMPTS};

/// Applies `delta` to an item's quantity inside the caller's transaction.
///
/// Returns the new quantity.
pub(crate) async fn apply_delta_in<C>(
    conn: &C,
    item_id: ItemId,
    delta: i32,
) -> Result<i32, RepositoryError>
where
    C: ConnectionTrait,
{
    let guard = if delta < 0 {
        items::Column::Quantity.gte(delta.saturating_neg())
    } else {
        items::Column::Quantity.lte(i32::MAX - delta)
    };

    let result = items::Entity::update_many()
        .col_expr(
            items::Column::Quantity,
            Expr::col(items::Column::Quantity).add(delta),
        )
        .filter(items::Column::Id.eq(item_id.into_inner()))
        .filter(guard)
        .exec(conn)
        .await?;

    let item = items::Entity::find_by_id(item_id.into_inner())
        .one(conn)
        .await?
        .ok_or_else(|| InventoryError::not_found(EntityKind::Item, item_id))?;

    if result.rows_affected == 0 {
        return Err(rejected_delta(item_id, item.quantity, delta));
    }

    debug!(%item_id, delta, quantity = item.quantity, "stock delta applied");
    Ok(item.quantity)
}

/// Classifies a delta the guarded update refused, given the quantity read
/// back afterwards.
///
/// If `observed` would have allowed the delta, the row moved between the
/// update and the read, and the caller should retry.
fn rejected_delta(item_id: ItemId, observed: i32, delta: i32) -> RepositoryError {
    match StockLedger::apply_delta(item_id, observed, delta) {
        Err(err) => err.into(),
        Ok(_) => InventoryError::conflict(format!(
            "stock for item {item_id} changed while applying {delta}"
        ))
        .into(),
    }
}

/// Applies a planned movement inside the caller's transaction.
pub(crate) async fn apply_movement_in<C>(
    conn: &C,
    item_id: ItemId,
    movement: StockMovement,
) -> Result<i32, RepositoryError>
where
    C: ConnectionTrait,
{
    apply_delta_in(conn, item_id, movement.delta()).await
}

/// Direct access to the stock ledger.
#[derive(Debug, Clone)]
pub struct StockRepository {
    db: DatabaseConnection,
    max_attempts: u32,
}

impl StockRepository {
    /// Creates a new stock repository.
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

    /// Applies a signed delta to an item's quantity in its own transaction.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the item does not exist
    /// - `InsufficientStock` if the result would be negative; nothing changes
    /// - `InvalidQuantity` if the result would overflow; nothing changes
    pub async fn apply_delta(&self, item_id: ItemId, delta: i32) -> Result<i32, InventoryError> {
        with_retry("apply_delta", self.max_attempts, move || async move {
            let txn = self.db.begin().await?;
            let result = apply_delta_in(&txn, item_id, delta).await;
            finish(txn, result).await
        })
        .await
    }

    /// Returns the current quantity of an item.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the item does not exist.
    pub async fn quantity(&self, item_id: ItemId) -> Result<i32, InventoryError> {
        let item = items::Entity::find_by_id(item_id.into_inner())
            .one(&self.db)
            .await
            .map_err(RepositoryError::from)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Item, item_id))?;
        Ok(item.quantity)
    }
}
