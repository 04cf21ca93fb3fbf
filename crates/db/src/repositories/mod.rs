//! Repository abstractions for data access.
//!
//! One repository per aggregate; each wraps a `DatabaseConnection` and
//! exposes typed CRUD operations.

pub mod agent;
pub mod booking;
pub mod enquiry;
pub mod hotel;
pub mod lead;
pub mod pricing;
pub mod profile;
pub mod quote;
pub mod restaurant;
pub mod session;
pub mod settings;
pub mod sightseeing;
pub mod staff;
pub mod transport;
pub mod user;

pub use agent::AgentRepository;
pub use booking::BookingRepository;
pub use enquiry::EnquiryRepository;
pub use hotel::HotelRepository;
pub use lead::LeadRepository;
pub use pricing::PricingRepository;
pub use profile::ProfileRepository;
pub use quote::QuoteRepository;
pub use restaurant::RestaurantRepository;
pub use session::SessionRepository;
pub use settings::SettingsRepository;
pub use sightseeing::SightseeingRepository;
pub use staff::StaffRepository;
pub use transport::TransportRepository;
pub use user::UserRepository;
