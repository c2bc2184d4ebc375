//! Shared fixtures for repository integration tests.
//!
//! Every test gets its own SQLite database migrated by the real `Migrator`.
//! `setup_db` is in-memory on one connection, so the database lives as long
//! as the pool does. `setup_shared_db` is a WAL-mode file with several
//! connections, for tests whose transactions must overlap.

#![allow(dead_code)]

use std::path::PathBuf;

use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use stockbook_core::catalog::{Customer, Item, NewItem, PartyDetails, Supplier};
use stockbook_db::migration::Migrator;
use stockbook_db::{CustomerRepository, ItemRepository, SupplierRepository};
use uuid::Uuid;

pub async fn setup_db() -> DatabaseConnection {
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

/// A file-backed database, deleted on drop.
pub struct SharedDb {
    pub db: DatabaseConnection,
    path: PathBuf,
}

impl Drop for SharedDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", self.path.display()));
        }
    }
}

pub async fn setup_shared_db(connections: u32) -> SharedDb {
    let path = std::env::temp_dir().join(format!("stockbook-{}.db", Uuid::new_v4()));
    let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
    options
        .max_connections(connections)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("connect to file sqlite");
    db.execute_unprepared("PRAGMA journal_mode=WAL")
        .await
        .expect("enable WAL");
    Migrator::up(&db, None).await.expect("run migrations");
    SharedDb { db, path }
}

pub async fn create_item(db: &DatabaseConnection, name: &str, quantity: i32, price: Decimal) -> Item {
    ItemRepository::new(db.clone())
        .create_item(NewItem {
            name: name.to_string(),
            description: None,
            quantity,
            price,
        })
        .await
        .expect("create item")
}

pub async fn create_customer(db: &DatabaseConnection, name: &str) -> Customer {
    CustomerRepository::new(db.clone())
        .create_customer(PartyDetails {
            name: name.to_string(),
            ..PartyDetails::default()
        })
        .await
        .expect("create customer")
}

pub async fn create_supplier(db: &DatabaseConnection, name: &str) -> Supplier {
    SupplierRepository::new(db.clone())
        .create_supplier(PartyDetails {
            name: name.to_string(),
            ..PartyDetails::default()
        })
        .await
        .expect("create supplier")
}

pub async fn quantity_of(db: &DatabaseConnection, item: &Item) -> i32 {
    ItemRepository::new(db.clone())
        .get_item(item.id)
        .await
        .expect("load item")
        .quantity
}
