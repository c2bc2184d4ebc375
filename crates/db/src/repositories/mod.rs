//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every ledger-affecting method runs in its own transaction and returns
//! [`stockbook_core::InventoryError`].

pub mod invoice;
pub mod item;
pub mod order;
pub mod party;
pub mod purchase;
pub mod report;
pub mod stock;

pub use invoice::InvoiceRepository;
pub use item::ItemRepository;
pub use order::OrderRepository;
pub use party::{CustomerRepository, SupplierRepository};
pub use purchase::PurchaseRepository;
pub use report::ReportRepository;
pub use stock::StockRepository;
