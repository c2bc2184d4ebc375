//! Repository error type.
//!
//! Inside a unit of work, failures are either domain rejections from the core
//! or store errors from `SeaORM`. Both leave the crate as [`InventoryError`].

use sea_orm::DbErr;
use stockbook_core::InventoryError;
use thiserror::Error;

/// Errors raised while a repository operation is in flight.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Business rule rejection.
    #[error(transparent)]
    Domain(#[from] InventoryError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Store messages that indicate a conflict a fresh attempt may resolve.
///
/// Foreign-key violations are included: every write checks its references
/// first, so a violation means a concurrent delete won the race.
const TRANSIENT_MARKERS: [&str; 7] = [
    "could not serialize access",
    "deadlock detected",
    "lock timeout",
    "database is locked",
    "database table is locked",
    "violates foreign key constraint",
    "foreign key constraint failed",
];

impl RepositoryError {
    /// Returns true if the operation should be retried in a new transaction.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Domain(err) => err.is_retryable(),
            Self::Database(err) => is_transient(err),
        }
    }
}

fn is_transient(err: &DbErr) -> bool {
    let message = err.to_string().to_lowercase();
    TRANSIENT_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

impl From<RepositoryError> for InventoryError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Domain(err) => err,
            RepositoryError::Database(err) => Self::PersistenceFailure {
                transient: is_transient(&err),
                message: err.to_string(),
            },
        }
    }
}
