//! Purchase repository.
//!
//! Purchases put units into stock and are never cancelled.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, TransactionTrait,
};
use stockbook_core::lifecycle::{CreatePurchase, LifecycleService, Purchase, PurchaseFilter};
use stockbook_core::{EntityKind, InventoryError};
use stockbook_shared::types::{PageRequest, PageResponse, PurchaseId};
use tracing::info;

use super::item::find_item_in;
use super::party::find_supplier_in;
use super::stock::apply_movement_in;
use crate::entities::purchases;
use crate::error::RepositoryError;
use crate::unit_of_work::{finish, with_retry, DEFAULT_MAX_ATTEMPTS};

/// Purchase repository for the restock side of the stock ledger.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    db: DatabaseConnection,
    max_attempts: u32,
}

impl PurchaseRepository {
    /// Creates a new purchase repository.
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

    /// Records a restock of `cmd.quantity` units.
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity` if the quantity is not positive
    /// - `NotFound` if the item or supplier does not exist
    pub async fn create_purchase(&self, cmd: CreatePurchase) -> Result<Purchase, InventoryError> {
        LifecycleService::validate_quantity(cmd.quantity)?;

        let purchase = with_retry("create_purchase", self.max_attempts, move || async move {
            let txn = self.db.begin().await?;
            let result = create_purchase_in(&txn, cmd).await;
            finish(txn, result).await
        })
        .await?;

        info!(
            purchase_id = %purchase.id,
            item_id = %purchase.item_id,
            quantity = purchase.quantity,
            "purchase recorded"
        );
        Ok(purchase)
    }

    /// Finds a purchase by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the purchase does not exist.
    pub async fn get_purchase(&self, purchase_id: PurchaseId) -> Result<Purchase, InventoryError> {
        purchases::Entity::find_by_id(purchase_id.into_inner())
            .one(&self.db)
            .await
            .map_err(RepositoryError::from)?
            .map(Purchase::from)
            .ok_or_else(|| InventoryError::not_found(EntityKind::Purchase, purchase_id))
    }

    /// Lists purchases newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_purchases(
        &self,
        filter: PurchaseFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Purchase>, InventoryError> {
        let query = purchases::Entity::find()
            .apply_if(filter.item_id, |q, id| {
                q.filter(purchases::Column::ItemId.eq(id.into_inner()))
            })
            .apply_if(filter.supplier_id, |q, id| {
                q.filter(purchases::Column::SupplierId.eq(id.into_inner()))
            });

        let total = query
            .clone()
            .count(&self.db)
            .await
            .map_err(RepositoryError::from)?;

        let rows = query
            .order_by_desc(purchases::Column::PurchaseDate)
            .order_by_desc(purchases::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(RepositoryError::from)?;

        Ok(PageResponse::new(
            rows.into_iter().map(Purchase::from).collect(),
            page,
            total,
        ))
    }
}

async fn create_purchase_in<C>(conn: &C, cmd: CreatePurchase) -> Result<Purchase, RepositoryError>
where
    C: ConnectionTrait,
{
    let item = find_item_in(conn, cmd.item_id).await?;
    if let Some(supplier_id) = cmd.supplier_id {
        find_supplier_in(conn, supplier_id).await?;
    }

    let (purchase, movement) = LifecycleService::plan_purchase(&cmd, &item, Utc::now())?;

    apply_movement_in(conn, item.id, movement).await?;
    purchases::ActiveModel::from(&purchase).insert(conn).await?;

    Ok(purchase)
}
