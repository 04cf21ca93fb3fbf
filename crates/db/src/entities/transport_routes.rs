//! `SeaORM` Entity for the transport_routes table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transport_routes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub origin: String,
    pub destination: String,
    pub transport_type_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub distance_km: Decimal,
    pub duration_minutes: i32,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub base_fare: Decimal,
    pub currency: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::transport_types::Entity",
        from = "Column::TransportTypeId",
        to = "super::transport_types::Column::Id"
    )]
    TransportTypes,
    #[sea_orm(has_many = "super::intermediate_stops::Entity")]
    IntermediateStops,
}

impl Related<super::transport_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransportTypes.def()
    }
}

impl Related<super::intermediate_stops::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IntermediateStops.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
