//! `SeaORM` Entity for the intermediate_stops table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "intermediate_stops")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub route_id: Uuid,
    pub name: String,
    /// Ordinal of this stop along the route, starting at 1.
    pub position: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::transport_routes::Entity",
        from = "Column::RouteId",
        to = "super::transport_routes::Column::Id"
    )]
    TransportRoutes,
}

impl Related<super::transport_routes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransportRoutes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
