//! `SeaORM` Entity for the pricing_configurations table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "pricing_configurations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub currency: String,
    /// At most one configuration is active (partial unique index).
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::markup_slabs::Entity")]
    MarkupSlabs,
}

impl Related<super::markup_slabs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MarkupSlabs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
