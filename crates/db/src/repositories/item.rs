//! Item repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use stockbook_core::catalog::{ensure_unreferenced, Item, NewItem};
use stockbook_core::{EntityKind, InventoryError};
use stockbook_shared::types::{ItemId, PageRequest, PageResponse};
use tracing::info;

use crate::entities::{items, orders, purchases};
use crate::error::RepositoryError;
use crate::unit_of_work::{finish, with_retry, DEFAULT_MAX_ATTEMPTS};

/// Loads an item or fails with `NotFound`.
pub(crate) async fn find_item_in<C>(conn: &C, item_id: ItemId) -> Result<Item, RepositoryError>
where
    C: ConnectionTrait,
{
    items::Entity::find_by_id(item_id.into_inner())
        .one(conn)
        .await?
        .map(Item::from)
        .ok_or_else(|| InventoryError::not_found(EntityKind::Item, item_id).into())
}

/// Item repository for catalog operations on stock-keeping items.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    db: DatabaseConnection,
    max_attempts: u32,
}

impl ItemRepository {
    /// Creates a new item repository.
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

    /// Creates an item with its opening stock.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name, negative stock or
    /// negative price.
    pub async fn create_item(&self, input: NewItem) -> Result<Item, InventoryError> {
        let item = Item::create(input, Utc::now())?;

        items::ActiveModel {
            id: Set(item.id.into_inner()),
            name: Set(item.name.clone()),
            description: Set(item.description.clone()),
            quantity: Set(item.quantity),
            price: Set(item.price.amount()),
            created_at: Set(item.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(RepositoryError::from)?;

        info!(item_id = %item.id, name = %item.name, quantity = item.quantity, "item created");
        Ok(item)
    }

    /// Finds an item by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the item does not exist.
    pub async fn get_item(&self, item_id: ItemId) -> Result<Item, InventoryError> {
        Ok(find_item_in(&self.db, item_id).await?)
    }

    /// Lists items in name order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_items(&self, page: PageRequest) -> Result<PageResponse<Item>, InventoryError> {
        let query = items::Entity::find();
        let total = query
            .clone()
            .count(&self.db)
            .await
            .map_err(RepositoryError::from)?;

        let rows = query
            .order_by_asc(items::Column::Name)
            .order_by_asc(items::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(RepositoryError::from)?;

        Ok(PageResponse::new(
            rows.into_iter().map(Item::from).collect(),
            page,
            total,
        ))
    }

    /// Deletes an item that no order or purchase references.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the item does not exist
    /// - `InUse` if orders or purchases still reference it
    pub async fn delete_item(&self, item_id: ItemId) -> Result<(), InventoryError> {
        with_retry("delete_item", self.max_attempts, move || async move {
            let txn = self.db.begin().await?;
            let result = delete_item_in(&txn, item_id).await;
            finish(txn, result).await
        })
        .await?;

        info!(%item_id, "item deleted");
        Ok(())
    }
}

async fn delete_item_in<C>(conn: &C, item_id: ItemId) -> Result<(), RepositoryError>
where
    C: ConnectionTrait,
{
    let dependents = orders::Entity::find()
        .filter(orders::Column::ItemId.eq(item_id.into_inner()))
        .count(conn)
        .await?
        + purchases::Entity::find()
            .filter(purchases::Column::ItemId.eq(item_id.into_inner()))
            .count(conn)
            .await?;
    ensure_unreferenced(EntityKind::Item, item_id, dependents)?;

    let deleted = items::Entity::delete_by_id(item_id.into_inner())
        .exec(conn)
        .await?;
    if deleted.rows_affected == 0 {
        return Err(InventoryError::not_found(EntityKind::Item, item_id).into());
    }
    Ok(())
}
