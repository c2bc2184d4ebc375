//! Stock movements: orders and purchases.
//!
//! Foreign keys are `ON DELETE RESTRICT`; catalog records with history
//! cannot be removed.

use sea_orm_migration::prelude::*;

use super::m20260301_000001_catalog::{Customers, Items, Suppliers};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Orders::ItemId).uuid().not_null())
                    .col(ColumnDef::new(Orders::CustomerId).uuid().null())
                    .col(
                        ColumnDef::new(Orders::Quantity)
                            .integer()
                            .not_null()
                            .check(Expr::col(Orders::Quantity).gt(0)),
                    )
                    .col(
                        ColumnDef::new(Orders::OrderDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Orders::Invoiced)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_item")
                            .from(Orders::Table, Orders::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_customer")
                            .from(Orders::Table, Orders::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_orders_item", Orders::ItemId),
            ("idx_orders_customer", Orders::CustomerId),
            ("idx_orders_order_date", Orders::OrderDate),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Orders::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(Purchases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Purchases::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Purchases::ItemId).uuid().not_null())
                    .col(ColumnDef::new(Purchases::SupplierId).uuid().null())
                    .col(
                        ColumnDef::new(Purchases::Quantity)
                            .integer()
                            .not_null()
                            .check(Expr::col(Purchases::Quantity).gt(0)),
                    )
                    .col(
                        ColumnDef::new(Purchases::PurchaseDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchases_item")
                            .from(Purchases::Table, Purchases::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchases_supplier")
                            .from(Purchases::Table, Purchases::SupplierId)
                            .to(Suppliers::Table, Suppliers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_purchases_item", Purchases::ItemId),
            ("idx_purchases_supplier", Purchases::SupplierId),
            ("idx_purchases_purchase_date", Purchases::PurchaseDate),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Purchases::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Purchases::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Clone, Copy, DeriveIden)]
enum Orders {
    Table,
    Id,
    ItemId,
    CustomerId,
    Quantity,
    OrderDate,
    Invoiced,
}

#[derive(Clone, Copy, DeriveIden)]
enum Purchases {
    Table,
    Id,
    ItemId,
    SupplierId,
    Quantity,
    PurchaseDate,
}
