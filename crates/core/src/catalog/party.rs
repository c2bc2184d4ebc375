//! Customers and suppliers.
//!
//! Both carry the same contact card; they differ only in which side of the
//! stock flow they sit on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{CustomerId, SupplierId};

use crate::error::InventoryError;

/// Display and contact fields shared by customers and suppliers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyDetails {
    /// Display name.
    pub name: String,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Tax registration number.
    #[serde(default)]
    pub tax_number: Option<String>,
}

fn clean(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl PartyDetails {
    /// Trims every field and drops blank optional ones.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the name is blank or the email has no `@`.
    pub fn validate(self) -> Result<Self, InventoryError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(InventoryError::InvalidInput(
                "name cannot be empty".to_string(),
            ));
        }

        let email = clean(self.email);
        if let Some(email) = &email
            && !email.contains('@')
        {
            return Err(InventoryError::InvalidInput(format!(
                "invalid email address: {email}"
            )));
        }

        Ok(Self {
            name,
            phone: clean(self.phone),
            email,
            address: clean(self.address),
            tax_number: clean(self.tax_number),
        })
    }
}

/// A customer orders may be billed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Identity.
    pub id: CustomerId,
    /// Contact card.
    #[serde(flatten)]
    pub details: PartyDetails,
    /// When the customer was created.
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Validates `details` and builds a new customer.
    ///
    /// # Errors
    ///
    /// See [`PartyDetails::validate`].
    pub fn create(details: PartyDetails, now: DateTime<Utc>) -> Result<Self, InventoryError> {
        Ok(Self {
            id: CustomerId::new(),
            details: details.validate()?,
            created_at: now,
        })
    }
}

/// A supplier purchases may come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    /// Identity.
    pub id: SupplierId,
    /// Contact card.
    #[serde(flatten)]
    pub details: PartyDetails,
    /// When the supplier was created.
    pub created_at: DateTime<Utc>,
}

impl Supplier {
    /// Validates `details` and builds a new supplier.
    ///
    /// # Errors
    ///
    /// See [`PartyDetails::validate`].
    pub fn create(details: PartyDetails, now: DateTime<Utc>) -> Result<Self, InventoryError> {
        Ok(Self {
            id: SupplierId::new(),
            details: details.validate()?,
            created_at: now,
        })
    }
}
