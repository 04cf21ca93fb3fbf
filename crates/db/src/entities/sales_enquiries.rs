//! `SeaORM` Entity for the sales_enquiries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::EnquiryStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_enquiries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub lead_id: Option<Uuid>,
    pub customer_name: String,
    pub destination: String,
    pub requirements: Option<Json>,
    pub travel_start: Option<Date>,
    pub travel_end: Option<Date>,
    pub adults: i32,
    pub children: i32,
    pub status: EnquiryStatus,
    pub assigned_to: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sales_leads::Entity",
        from = "Column::LeadId",
        to = "super::sales_leads::Column::Id"
    )]
    SalesLeads,
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::AssignedTo",
        to = "super::profiles::Column::Id"
    )]
    Profiles,
    #[sea_orm(has_many = "super::quotes::Entity")]
    Quotes,
    #[sea_orm(has_many = "super::sales_bookings::Entity")]
    SalesBookings,
}

impl Related<super::sales_leads::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesLeads.def()
    }
}

impl Related<super::quotes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quotes.def()
    }
}

impl Related<super::sales_bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesBookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
