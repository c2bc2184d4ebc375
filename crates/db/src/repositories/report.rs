//! Report repository.

use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use stockbook_core::catalog::Item;
use stockbook_core::lifecycle::{Order, Purchase};
use stockbook_core::reports::{InventoryReport, ReportService};
use stockbook_core::InventoryError;

use crate::entities::prelude::{Items, Orders, Purchases};
use crate::error::RepositoryError;
use crate::unit_of_work::finish;

/// Repository that loads report inputs from one consistent snapshot.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the inventory overview.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn inventory_report(
        &self,
        low_stock_threshold: i32,
        recent_limit: usize,
    ) -> Result<InventoryReport, InventoryError> {
        let txn = self.db.begin().await.map_err(RepositoryError::from)?;
        let loaded = load_all(&txn).await;
        let (items, orders, purchases) = finish(txn, loaded).await?;

        Ok(ReportService::inventory_report(
            &items,
            &orders,
            &purchases,
            low_stock_threshold,
            recent_limit,
        ))
    }
}

async fn load_all(
    txn: &sea_orm::DatabaseTransaction,
) -> Result<(Vec<Item>, Vec<Order>, Vec<Purchase>), RepositoryError> {
    let items = Items::find()
        .all(txn)
        .await?
        .into_iter()
        .map(Item::from)
        .collect();
    let orders = Orders::find()
        .all(txn)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();
    let purchases = Purchases::find()
        .all(txn)
        .await?
        .into_iter()
        .map(Purchase::from)
        .collect();
    Ok((items, orders, purchases))
}
