//! `SeaORM` Entity for the sales_leads table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::LeadStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_leads")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub travel_start: Option<Date>,
    pub travel_end: Option<Date>,
    pub adults: i32,
    pub children: i32,
    pub status: LeadStatus,
    pub assigned_to: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::AssignedTo",
        to = "super::profiles::Column::Id"
    )]
    Profiles,
    #[sea_orm(has_many = "super::sales_enquiries::Entity")]
    SalesEnquiries,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profiles.def()
    }
}

impl Related<super::sales_enquiries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesEnquiries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
