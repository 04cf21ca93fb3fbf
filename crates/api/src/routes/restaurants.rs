//! Restaurant inventory routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser, middleware::auth::forbidden};
use triplexa_db::RestaurantRepository;
use triplexa_db::repositories::restaurant::RestaurantInput;
use triplexa_shared::types::PageRequest;

/// Creates the restaurants router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route("/restaurants", post(create_restaurant))
        .route("/restaurants/{restaurant_id}", get(get_restaurant))
        .route("/restaurants/{restaurant_id}", put(update_restaurant))
        .route(
            "/restaurants/{restaurant_id}",
            axum::routing::delete(deactivate_restaurant),
        )
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred"
        })),
    )
        .into_response()
}

/// Create/update payload.
#[derive(Debug, Deserialize)]
struct RestaurantRequest {
    city: String,
    name: String,
    cuisine: Option<String>,
    meal_type: Option<String>,
    cost_per_person: Decimal,
    #[serde(default = "default_currency")]
    currency: String,
}

fn default_currency() -> String {
    "INR".to_string()
}

impl RestaurantRequest {
    fn into_input(self) -> RestaurantInput {
        RestaurantInput {
            city: self.city,
            name: self.name,
            cuisine: self.cuisine,
            meal_type: self.meal_type,
            cost_per_person: self.cost_per_person,
            currency: self.currency,
        }
    }
}

/// Query parameters for listing.
#[derive(Debug, Deserialize)]
struct ListQuery {
    city: Option<String>,
}

/// GET /restaurants - List active restaurants, optionally by city.
async fn list_restaurants(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListQuery>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = RestaurantRepository::new((*state.db).clone());
    match repo
        .list(query.city.as_deref(), page.offset(), page.limit())
        .await
    {
        Ok((restaurants, total)) => (
            StatusCode::OK,
            Json(json!({
                "data": restaurants,
                "meta": {
                    "page": page.page,
                    "per_page": page.per_page,
                    "total": total
                }
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error listing restaurants");
            internal_error()
        }
    }
}

/// POST /restaurants - Create a restaurant (back office).
async fn create_restaurant(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<RestaurantRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to manage inventory");
    }

    if payload.cost_per_person < Decimal::ZERO {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_amount",
                "message": "Cost per person must be non-negative"
            })),
        )
            .into_response();
    }

    let repo = RestaurantRepository::new((*state.db).clone());
    match repo.create(&payload.into_input()).await {
        Ok(restaurant) => {
            info!(restaurant_id = %restaurant.id, name = %restaurant.name, "Restaurant created");
            (StatusCode::CREATED, Json(json!(restaurant))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create restaurant");
            internal_error()
        }
    }
}

/// GET `/restaurants/{restaurant_id}` - Get a restaurant.
async fn get_restaurant(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(restaurant_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    let repo = RestaurantRepository::new((*state.db).clone());
    match repo.find_by_id(restaurant_id).await {
        Ok(Some(restaurant)) => (StatusCode::OK, Json(json!(restaurant))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Restaurant not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error loading restaurant");
            internal_error()
        }
    }
}

/// PUT `/restaurants/{restaurant_id}` - Update a restaurant (back office).
async fn update_restaurant(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(restaurant_id): Path<uuid::Uuid>,
    Json(payload): Json<RestaurantRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to manage inventory");
    }

    if payload.cost_per_person < Decimal::ZERO {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_amount",
                "message": "Cost per person must be non-negative"
            })),
        )
            .into_response();
    }

    let repo = RestaurantRepository::new((*state.db).clone());
    match repo.update(restaurant_id, &payload.into_input()).await {
        Ok(restaurant) => {
            info!(restaurant_id = %restaurant_id, "Restaurant updated");
            (StatusCode::OK, Json(json!(restaurant))).into_response()
        }
        Err(sea_orm::DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Restaurant not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to update restaurant");
            internal_error()
        }
    }
}

/// DELETE `/restaurants/{restaurant_id}` - Deactivate a restaurant (back office).
async fn deactivate_restaurant(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(restaurant_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to manage inventory");
    }

    let repo = RestaurantRepository::new((*state.db).clone());
    match repo.deactivate(restaurant_id).await {
        Ok(()) => {
            info!(restaurant_id = %restaurant_id, "Restaurant deactivated");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(sea_orm::DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Restaurant not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to deactivate restaurant");
            internal_error()
        }
    }
}
