//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//! - Transaction scoping with bounded retry for transient conflicts

pub mod entities;
pub mod error;
pub mod migration;
pub mod repositories;
mod unit_of_work;

#[cfg(test)]
mod test_support;

pub use error::RepositoryError;
pub use repositories::{
    CustomerRepository, InvoiceRepository, ItemRepository, OrderRepository, PurchaseRepository,
    ReportRepository, StockRepository, SupplierRepository,
};
pub use unit_of_work::DEFAULT_MAX_ATTEMPTS;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use stockbook_shared::config::DatabaseConfig;

/// Establishes a connection pool to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    Database::connect(options).await
}
