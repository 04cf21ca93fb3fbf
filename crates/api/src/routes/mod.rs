//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod agents;
pub mod auth;
pub mod bookings;
pub mod enquiries;
pub mod health;
pub mod hotels;
pub mod leads;
pub mod pricing;
pub mod profiles;
pub mod quotes;
pub mod restaurants;
pub mod settings;
pub mod sightseeing;
pub mod staff;
pub mod transport;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(profiles::routes())
        .merge(agents::routes())
        .merge(staff::routes())
        .merge(transport::routes())
        .merge(sightseeing::routes())
        .merge(hotels::routes())
        .merge(restaurants::routes())
        .merge(leads::routes())
        .merge(enquiries::routes())
        .merge(bookings::routes())
        .merge(quotes::routes())
        .merge(pricing::routes())
        .merge(settings::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}
