//! Fixtures for the in-crate repository tests.

use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use stockbook_core::catalog::{Item, NewItem};

use crate::migration::Migrator;
use crate::ItemRepository;

/// A migrated in-memory SQLite database on a single connection.
pub(crate) async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub(crate) async fn create_item(db: &DatabaseConnection, quantity: i32, price: Decimal) -> Item {
    ItemRepository::new(db.clone())
        .create_item(NewItem {
            name: "Widget".to_string(),
            description: None,
            quantity,
            price,
        })
        .await
        .expect("create item")
}
