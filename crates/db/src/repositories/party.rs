//! Customer and supplier repositories.
//!
//! Both tables share a layout and a delete policy; the repositories differ
//! only in which movement table references them.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use stockbook_core::catalog::{ensure_unreferenced, Customer, PartyDetails, Supplier};
use stockbook_core::{EntityKind, InventoryError};
use stockbook_shared::types::{CustomerId, PageRequest, PageResponse, SupplierId};
use tracing::info;

use crate::entities::{customers, orders, purchases, suppliers};
use crate::error::RepositoryError;
use crate::unit_of_work::{finish, with_retry, DEFAULT_MAX_ATTEMPTS};

/// Generates a repository for one party table.
macro_rules! party_repository {
    (
        $(#[$meta:meta])*
        $repo:ident {
            record: $record:ident,
            id: $id:ident,
            kind: $kind:expr,
            table: $table:ident,
            dependents: $dep_table:ident :: $dep_col:ident,
            create: $create:ident,
            get: $get:ident,
            list: $list:ident,
            delete: $delete:ident,
            find_in: $find_in:ident,
        }
    ) => {
        /// Loads a record or fails with `NotFound`.
        pub(crate) async fn $find_in<C>(conn: &C, id: $id) -> Result<$record, RepositoryError>
        where
            C: ConnectionTrait,
        {
            $table::Entity::find_by_id(id.into_inner())
                .one(conn)
                .await?
                .map($record::from)
                .ok_or_else(|| InventoryError::not_found($kind, id).into())
        }

        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $repo {
            db: DatabaseConnection,
            max_attempts: u32,
        }

        impl $repo {
            /// Creates a new repository.
            #[must_use]
            pub const fn new(db: DatabaseConnection) -> Self {
                Self {
                    db,
                    max_attempts: DEFAULT_MAX_ATTEMPTS,
                }
            }

            /// Sets the number of attempts for transient failures.
            #[must_use]
            pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
                self.max_attempts = max_attempts;
                self
            }

            /// Creates a record from validated contact details.
            ///
            /// # Errors
            ///
            /// Returns `InvalidInput` for a blank name or malformed email.
            pub async fn $create(&self, details: PartyDetails) -> Result<$record, InventoryError> {
                let record = $record::create(details, Utc::now())?;

                $table::ActiveModel {
                    id: Set(record.id.into_inner()),
                    name: Set(record.details.name.clone()),
                    phone: Set(record.details.phone.clone()),
                    email: Set(record.details.email.clone()),
                    address: Set(record.details.address.clone()),
                    tax_number: Set(record.details.tax_number.clone()),
                    created_at: Set(record.created_at),
                }
                .insert(&self.db)
                .await
                .map_err(RepositoryError::from)?;

                info!(entity = %$kind, id = %record.id, name = %record.details.name, "created");
                Ok(record)
            }

            /// Finds a record by ID.
            ///
            /// # Errors
            ///
            /// Returns `NotFound` if the record does not exist.
            pub async fn $get(&self, id: $id) -> Result<$record, InventoryError> {
                Ok($find_in(&self.db, id).await?)
            }

            /// Lists records in name order.
            ///
            /// # Errors
            ///
            /// Returns an error if the database query fails.
            pub async fn $list(
                &self,
                page: PageRequest,
            ) -> Result<PageResponse<$record>, InventoryError> {
                let query = $table::Entity::find();
                let total = query
                    .clone()
                    .count(&self.db)
                    .await
                    .map_err(RepositoryError::from)?;

                let rows = query
                    .order_by_asc($table::Column::Name)
                    .order_by_asc($table::Column::Id)
                    .offset(page.offset())
                    .limit(page.limit())
                    .all(&self.db)
                    .await
                    .map_err(RepositoryError::from)?;

                Ok(PageResponse::new(
                    rows.into_iter().map($record::from).collect(),
                    page,
                    total,
                ))
            }

            /// Deletes a record nothing references.
            ///
            /// # Errors
            ///
            /// - `NotFound` if the record does not exist
            /// - `InUse` if orders or purchases still reference it
            pub async fn $delete(&self, id: $id) -> Result<(), InventoryError> {
                with_retry(stringify!($delete), self.max_attempts, move || async move {
                    let txn = self.db.begin().await?;
                    let result = async {
                        let dependents = $dep_table::Entity::find()
                            .filter($dep_table::Column::$dep_col.eq(id.into_inner()))
                            .count(&txn)
                            .await?;
                        ensure_unreferenced($kind, id, dependents)?;

                        let deleted = $table::Entity::delete_by_id(id.into_inner())
                            .exec(&txn)
                            .await?;
                        if deleted.rows_affected == 0 {
                            return Err(RepositoryError::from(InventoryError::not_found($kind, id)));
                        }
                        Ok::<(), RepositoryError>(())
                    }
                    .await;
                    finish(txn, result).await
                })
                .await?;

                info!(entity = %$kind, %id, "deleted");
                Ok(())
            }
        }
    };
}

party_repository! {
    /// Customer repository.
    CustomerRepository {
        record: Customer,
        id: CustomerId,
        kind: EntityKind::Customer,
        table: customers,
        dependents: orders::CustomerId,
        create: create_customer,
        get: get_customer,
        list: list_customers,
        delete: delete_customer,
        find_in: find_customer_in,
    }
}

party_repository! {
    /// Supplier repository.
    SupplierRepository {
        record: Supplier,
        id: SupplierId,
        kind: EntityKind::Supplier,
        table: suppliers,
        dependents: purchases::SupplierId,
        create: create_supplier,
        get: get_supplier,
        list: list_suppliers,
        delete: delete_supplier,
        find_in: find_supplier_in,
    }
}
