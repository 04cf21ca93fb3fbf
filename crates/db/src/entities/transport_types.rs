//! `SeaORM` Entity for the transport_types table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transport_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub vehicle_class: Option<String>,
    pub seats: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transport_routes::Entity")]
    TransportRoutes,
}

impl Related<super::transport_routes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransportRoutes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
