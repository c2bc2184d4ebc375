//! Catalog tables: items, customers, suppliers.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Items::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Items::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Items::Description).text().null())
                    .col(
                        ColumnDef::new(Items::Quantity)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Items::Quantity).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Items::Price)
                            .decimal_len(12, 2)
                            .not_null()
                            .default(0)
                            .check(Expr::col(Items::Price).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Items::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_items_name")
                    .table(Items::Table)
                    .col(Items::Name)
                    .to_owned(),
            )
            .await?;

        create_party_table(manager, Customers::Table).await?;
        create_party_table(manager, Suppliers::Table).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Suppliers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Items::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

/// Customers and suppliers share one column layout.
async fn create_party_table<T>(manager: &SchemaManager<'_>, table: T) -> Result<(), DbErr>
where
    T: IntoIden + 'static,
{
    manager
        .create_table(
            Table::create()
                .table(table)
                .if_not_exists()
                .col(ColumnDef::new(Party::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Party::Name).string_len(255).not_null())
                .col(ColumnDef::new(Party::Phone).string_len(32).null())
                .col(ColumnDef::new(Party::Email).string_len(255).null())
                .col(ColumnDef::new(Party::Address).text().null())
                .col(ColumnDef::new(Party::TaxNumber).string_len(32).null())
                .col(
                    ColumnDef::new(Party::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .to_owned(),
        )
        .await
}

#[derive(DeriveIden)]
pub(super) enum Items {
    Table,
    Id,
    Name,
    Description,
    Quantity,
    Price,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(super) enum Customers {
    Table,
    Id,
}

#[derive(DeriveIden)]
pub(super) enum Suppliers {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Party {
    Id,
    Name,
    Phone,
    Email,
    Address,
    TaxNumber,
    CreatedAt,
}
