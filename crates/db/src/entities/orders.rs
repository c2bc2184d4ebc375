//! `SeaORM` Entity for orders table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use stockbook_core::lifecycle::Order;
use stockbook_shared::types::{CustomerId, ItemId, OrderId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub item_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub quantity: i32,
    pub order_date: DateTimeUtc,
    pub invoiced: bool,
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
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id",
        on_delete = "Restrict"
    )]
    Customers,
}

impl Related<super::items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Order {
    fn from(model: Model) -> Self {
        Self {
            id: OrderId::from_uuid(model.id),
            item_id: ItemId::from_uuid(model.item_id),
            customer_id: model.customer_id.map(CustomerId::from_uuid),
            quantity: model.quantity,
            order_date: model.order_date,
            invoiced: model.invoiced,
        }
    }
}

impl From<&Order> for ActiveModel {
    fn from(order: &Order) -> Self {
        use sea_orm::ActiveValue::Set;

        Self {
            id: Set(order.id.into_inner()),
            item_id: Set(order.item_id.into_inner()),
            customer_id: Set(order.customer_id.map(CustomerId::into_inner)),
            quantity: Set(order.quantity),
            order_date: Set(order.order_date),
            invoiced: Set(order.invoiced),
        }
    }
}
