//! `SeaORM` active enums mapping Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User role (`user_role` enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access, can manage settings and pricing.
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Manages staff, inventory, and the sales pipeline.
    #[sea_orm(string_value = "manager")]
    Manager,
    /// Operates the sales pipeline and inventory.
    #[sea_orm(string_value = "staff")]
    Staff,
    /// External travel agent.
    #[sea_orm(string_value = "agent")]
    Agent,
}

/// Agent account status (`agent_status` enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "agent_status")]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Awaiting credential setup or approval.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Active, can log in.
    #[sea_orm(string_value = "active")]
    Active,
    /// Suspended, login refused.
    #[sea_orm(string_value = "suspended")]
    Suspended,
}

/// Sales lead status (`lead_status` enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "lead_status")]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// Fresh lead.
    #[sea_orm(string_value = "new")]
    New,
    /// First contact made.
    #[sea_orm(string_value = "contacted")]
    Contacted,
    /// Ready to convert.
    #[sea_orm(string_value = "qualified")]
    Qualified,
    /// Dead lead.
    #[sea_orm(string_value = "lost")]
    Lost,
}

/// Sales enquiry status (`enquiry_status` enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "enquiry_status")]
#[serde(rename_all = "snake_case")]
pub enum EnquiryStatus {
    /// No quote yet.
    #[sea_orm(string_value = "open")]
    Open,
    /// A quote has been issued.
    #[sea_orm(string_value = "quoted")]
    Quoted,
    /// Converted to a booking.
    #[sea_orm(string_value = "won")]
    Won,
    /// Dropped.
    #[sea_orm(string_value = "lost")]
    Lost,
}

/// Booking status (`booking_status` enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "booking_status")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Confirmed, travel upcoming.
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    /// Travel completed.
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Booking payment status (`payment_status` enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing received.
    #[sea_orm(string_value = "unpaid")]
    Unpaid,
    /// Advance received.
    #[sea_orm(string_value = "partial")]
    Partial,
    /// Fully settled.
    #[sea_orm(string_value = "paid")]
    Paid,
}

/// Quote status (`quote_status` enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "quote_status")]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    /// Being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Sent to the customer.
    #[sea_orm(string_value = "sent")]
    Sent,
    /// Accepted by the customer.
    #[sea_orm(string_value = "accepted")]
    Accepted,
    /// Rejected by the customer.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Quote line item kind (`quote_item_kind` enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "quote_item_kind")]
#[serde(rename_all = "snake_case")]
pub enum QuoteItemKind {
    /// Hotel room nights.
    #[sea_orm(string_value = "hotel")]
    Hotel,
    /// Transport route fare.
    #[sea_orm(string_value = "transport")]
    Transport,
    /// Sightseeing tickets.
    #[sea_orm(string_value = "sightseeing")]
    Sightseeing,
    /// Restaurant meals.
    #[sea_orm(string_value = "restaurant")]
    Restaurant,
    /// Anything not tied to inventory.
    #[sea_orm(string_value = "other")]
    Other,
}

/// Markup kind (`markup_kind` enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "markup_kind")]
#[serde(rename_all = "snake_case")]
pub enum MarkupKind {
    /// Percentage of the base amount.
    #[sea_orm(string_value = "percentage")]
    Percentage,
    /// Fixed amount added to the base.
    #[sea_orm(string_value = "fixed")]
    Fixed,
}
