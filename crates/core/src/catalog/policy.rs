//! Delete policy for catalog records.
//!
//! Items, customers and suppliers that are still referenced by orders or
//! purchases cannot be deleted. Dependents are never cascaded away, since
//! that would silently rewrite stock history.

use uuid::Uuid;

use crate::error::{EntityKind, InventoryError};

/// Allows deletion only when no order or purchase references the record.
///
/// # Errors
///
/// Returns `InUse` carrying the dependent count when `dependents > 0`.
pub fn ensure_unreferenced(
    entity: EntityKind,
    id: impl Into<Uuid>,
    dependents: u64,
) -> Result<(), InventoryError> {
    if dependents > 0 {
        return Err(InventoryError::InUse {
            entity,
            id: id.into(),
            dependents,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockbook_shared::types::ItemId;

    #[test]
    fn test_unreferenced_record_may_be_deleted() {
        assert!(ensure_unreferenced(EntityKind::Item, ItemId::new(), 0).is_ok());
    }

    #[test]
    fn test_referenced_record_is_rejected() {
        let id = ItemId::new();
        let err = ensure_unreferenced(EntityKind::Item, id, 3).unwrap_err();
        assert_eq!(
            err,
            InventoryError::InUse {
                entity: EntityKind::Item,
                id: id.into(),
                dependents: 3,
            }
        );
    }
}
