//! Inventory error types.
//!
//! Every stock, order, purchase, catalog and invoicing operation fails with an
//! [`InventoryError`]. Business errors are expected outcomes the caller turns into
//! a user-facing message; only transient persistence failures are retried.

use rust_decimal::Decimal;
use serde::Serialize;
use stockbook_shared::types::{ItemId, OrderId};
use thiserror::Error;
use uuid::Uuid;

/// Kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Stock-keeping item.
    Item,
    /// Customer.
    Customer,
    /// Supplier.
    Supplier,
    /// Sales order.
    Order,
    /// Purchase.
    Purchase,
}

impl EntityKind {
    /// Returns the lowercase name of the entity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Customer => "customer",
            Self::Supplier => "supplier",
            Self::Order => "order",
            Self::Purchase => "purchase",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during inventory operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    // ========== Lookup Errors ==========
    /// Referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// What kind of record was looked up.
        entity: EntityKind,
        /// The identity that was not found.
        id: Uuid,
    },

    // ========== Validation Errors ==========
    /// Quantity is zero or negative where a positive count is required,
    /// or negative where a non-negative count is required.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i32),

    /// Price cannot be negative.
    #[error("Price cannot be negative: {0}")]
    InvalidPrice(Decimal),

    /// Malformed descriptive input (empty name, empty reference, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invoice requested with no orders.
    #[error("Invoice must reference at least one order")]
    EmptyInvoice,

    // ========== Stock Errors ==========
    /// The requested decrement would make the item's quantity negative.
    #[error("Insufficient stock for item {item_id}: requested {requested}, only {available} available")]
    InsufficientStock {
        /// The item being decremented.
        item_id: ItemId,
        /// Units requested.
        requested: i32,
        /// Units on hand when the request was evaluated.
        available: i32,
    },

    // ========== State Errors ==========
    /// The order is already frozen into an invoice.
    #[error("Order {0} is already invoiced")]
    AlreadyInvoiced(OrderId),

    /// Deletion rejected because dependent orders or purchases exist.
    #[error("Cannot delete {entity} {id}: still referenced by {dependents} order(s) or purchase(s)")]
    InUse {
        /// What kind of record deletion was attempted on.
        entity: EntityKind,
        /// The record's identity.
        id: Uuid,
        /// Number of dependent rows.
        dependents: u64,
    },

    // ========== Persistence Errors ==========
    /// The underlying store failed to commit.
    #[error("Persistence failure: {message}")]
    PersistenceFailure {
        /// Store-provided detail.
        message: String,
        /// Whether the failure is a transient conflict worth retrying.
        transient: bool,
    },
}

impl InventoryError {
    /// Shorthand for [`InventoryError::NotFound`].
    #[must_use]
    pub fn not_found(entity: EntityKind, id: impl Into<Uuid>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// A transient conflict detected by the service itself (e.g. a concurrent
    /// invoicer marked an order between read and write).
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::PersistenceFailure {
            message: message.into(),
            transient: true,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidQuantity(_) => "INVALID_QUANTITY",
            Self::InvalidPrice(_) => "INVALID_PRICE",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::EmptyInvoice => "EMPTY_INVOICE",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::AlreadyInvoiced(_) => "ALREADY_INVOICED",
            Self::InUse { .. } => "IN_USE",
            Self::PersistenceFailure { .. } => "PERSISTENCE_FAILURE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::InvalidQuantity(_)
            | Self::InvalidPrice(_)
            | Self::InvalidInput(_)
            | Self::EmptyInvoice => 400,

            // 404 Not Found
            Self::NotFound { .. } => 404,

            // 409 Conflict - request clashes with current state
            Self::InsufficientStock { .. } | Self::AlreadyInvoiced(_) | Self::InUse { .. } => 409,

            // 503 when a retry later may succeed, 500 otherwise
            Self::PersistenceFailure { transient: true, .. } => 503,
            Self::PersistenceFailure { transient: false, .. } => 500,
        }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::PersistenceFailure { transient: true, .. })
    }
}
