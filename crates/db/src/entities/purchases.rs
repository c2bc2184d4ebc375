//! `SeaORM` Entity for purchases table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use stockbook_core::lifecycle::Purchase;
use stockbook_shared::types::{ItemId, PurchaseId, SupplierId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub item_id: Uuid,
    pub supplier_id: Option<Uuid>,
    pub quantity: i32,
    pub purchase_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::items::Entity",
        from = "Column::ItemId",
        to = "super::items::Column::Id",
        on_delete = "Restrict"
    )]
    Items,
    #[sea_orm(
        belongs_to = "super::suppliers::Entity",
        from = "Column::SupplierId",
        to = "super::suppliers::Column::Id",
        on_delete = "Restrict"
    )]
    Suppliers,
}

impl Related<super::items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::suppliers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Suppliers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Purchase {
    fn from(model: Model) -> Self {
        Self {
            id: PurchaseId::from_uuid(model.id),
            item_id: ItemId::from_uuid(model.item_id),
            supplier_id: model.supplier_id.map(SupplierId::from_uuid),
            quantity: model.quantity,
            purchase_date: model.purchase_date,
        }
    }
}

impl From<&Purchase> for ActiveModel {
    fn from(purchase: &Purchase) -> Self {
        use sea_orm::ActiveValue::Set;

        Self {
            id: Set(purchase.id.into_inner()),
            item_id: Set(purchase.item_id.into_inner()),
            supplier_id: Set(purchase.supplier_id.map(SupplierId::into_inner)),
            quantity: Set(purchase.quantity),
            purchase_date: Set(purchase.purchase_date),
        }
    }
}
