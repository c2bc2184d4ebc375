//! Transaction scoping and bounded retry.
//!
//! Each command runs in exactly one `DatabaseTransaction`, which is committed
//! on success and rolled back on any error. Transient failures re-run the whole
//! command in a fresh transaction, up to a configured number of attempts.

use std::future::Future;
use std::time::Duration;

use sea_orm::DatabaseTransaction;
use stockbook_core::InventoryError;
use tracing::{error, warn};

use crate::error::RepositoryError;

/// Default number of attempts for a ledger-affecting command.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Commits `txn` if `result` is `Ok`, rolls it back otherwise.
pub(crate) async fn finish<T>(
    txn: DatabaseTransaction,
    result: Result<T, RepositoryError>,
) -> Result<T, RepositoryError> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}

/// Runs `attempt` until it succeeds, fails permanently, or `max_attempts` is
/// reached.
pub(crate) async fn with_retry<T, F, Fut>(
    operation: &'static str,
    max_attempts: u32,
    mut attempt: F,
) -> Result<T, InventoryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RepositoryError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut tries = 0;

    loop {
        tries += 1;
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && tries < max_attempts => {
                warn!(operation, attempt = tries, error = %err, "transient failure, retrying");
                tokio::time::sleep(Duration::from_millis(5 * u64::from(tries))).await;
            }
            Err(err) => {
                let err = InventoryError::from(err);
                if matches!(err, InventoryError::PersistenceFailure { .. }) {
                    error!(operation, attempts = tries, error = %err, "persistence failure");
                }
                return Err(err);
            }
        }
    }
}
