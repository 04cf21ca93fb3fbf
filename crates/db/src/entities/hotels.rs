//! `SeaORM` Entity for the hotels table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "hotels")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub city: String,
    pub name: String,
    pub star_rating: i16,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::hotel_room_rates::Entity")]
    HotelRoomRates,
}

impl Related<super::hotel_room_rates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HotelRoomRates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
