//! Role policy for API actions.
//!
//! Checked once per request, before the inventory core is called.

use stockbook_shared::{AppError, Principal, Role};

/// Something a principal can ask the API to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Read any catalog record, order, purchase or report.
    View,
    /// Add a customer or supplier.
    CreateParty,
    /// Add an item to the catalog.
    CreateItem,
    /// Delete an item, customer or supplier.
    DeleteCatalogRecord,
    /// Sell stock.
    CreateOrder,
    /// Cancel a sale and return its stock.
    CancelOrder,
    /// Record a restock.
    RecordPurchase,
    /// Freeze orders into an invoice.
    CreateInvoice,
}

impl Action {
    /// Least privileged role allowed to perform the action.
    #[must_use]
    pub const fn required_role(self) -> Role {
        match self {
            Self::View | Self::CreateParty | Self::CreateOrder | Self::CreateInvoice => Role::Staff,
            Self::CreateItem | Self::DeleteCatalogRecord | Self::CancelOrder | Self::RecordPurchase => {
                Role::Manager
            }
        }
    }

    const fn describe(self) -> &'static str {
        match self {
            Self::View => "view records",
            Self::CreateParty => "create customers or suppliers",
            Self::CreateItem => "create items",
            Self::DeleteCatalogRecord => "delete catalog records",
            Self::CreateOrder => "create orders",
            Self::CancelOrder => "cancel orders",
            Self::RecordPurchase => "record purchases",
            Self::CreateInvoice => "create invoices",
        }
    }
}

/// Checks that `principal` may perform `action`.
///
/// # Errors
///
/// Returns `AppError::Forbidden` if the principal's role is too low.
pub fn authorize(principal: &Principal, action: Action) -> Result<(), AppError> {
    if principal.has_at_least(action.required_role()) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "{} cannot {}",
            principal.role,
            action.describe()
        )))
    }
}
