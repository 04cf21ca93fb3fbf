//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//! - Row-level security context helpers

pub mod entities;
pub mod migration;
pub mod repositories;
pub mod rls;

pub use repositories::{
    AgentRepository, BookingRepository, EnquiryRepository, HotelRepository, LeadRepository,
    PricingRepository, ProfileRepository, QuoteRepository, RestaurantRepository,
    SessionRepository, SettingsRepository, SightseeingRepository, StaffRepository,
    TransportRepository, UserRepository,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
