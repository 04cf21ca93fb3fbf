//! `SeaORM` entity definitions for all Triplexa tables.

pub mod agents;
pub mod app_settings;
pub mod hotel_room_rates;
pub mod hotels;
pub mod intermediate_stops;
pub mod markup_slabs;
pub mod pricing_configurations;
pub mod profiles;
pub mod quote_items;
pub mod quotes;
pub mod restaurants;
pub mod sales_bookings;
pub mod sales_enquiries;
pub mod sales_leads;
pub mod sea_orm_active_enums;
pub mod sessions;
pub mod sightseeing_options;
pub mod staff_bank_accounts;
pub mod transport_routes;
pub mod transport_types;
pub mod user_roles;
pub mod users;
