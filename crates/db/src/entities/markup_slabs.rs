//! `SeaORM` Entity for the markup_slabs table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::MarkupKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "markup_slabs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub config_id: Uuid,
    /// Order of this slab within the configuration, starting at 1.
    pub position: i32,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub min_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub max_amount: Option<Decimal>,
    pub markup_kind: MarkupKind,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub markup_value: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pricing_configurations::Entity",
        from = "Column::ConfigId",
        to = "super::pricing_configurations::Column::Id"
    )]
    PricingConfigurations,
}

impl Related<super::pricing_configurations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PricingConfigurations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
