//! Hotel inventory routes.

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
use triplexa_db::HotelRepository;
use triplexa_shared::types::PageRequest;

/// Creates the hotels router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hotels", get(list_hotels))
        .route("/hotels", post(create_hotel))
        .route("/hotels/{hotel_id}", get(get_hotel))
        .route("/hotels/{hotel_id}", axum::routing::delete(deactivate_hotel))
        .route("/hotels/{hotel_id}/rates", put(upsert_rate))
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

/// Query parameters for listing.
#[derive(Debug, Deserialize)]
struct ListQuery {
    city: Option<String>,
}

/// GET /hotels - List active hotels, optionally by city.
async fn list_hotels(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListQuery>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = HotelRepository::new((*state.db).clone());
    match repo
        .list(query.city.as_deref(), page.offset(), page.limit())
        .await
    {
        Ok((hotels, total)) => (
            StatusCode::OK,
            Json(json!({
                "data": hotels,
                "meta": {
                    "page": page.page,
                    "per_page": page.per_page,
                    "total": total
                }
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error listing hotels");
            internal_error()
        }
    }
}

/// Create payload for hotels.
#[derive(Debug, Deserialize)]
struct CreateHotelRequest {
    city: String,
    name: String,
    star_rating: i16,
    address: Option<String>,
}

/// POST /hotels - Create a hotel (back office).
async fn create_hotel(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateHotelRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to manage inventory");
    }

    if !(1..=5).contains(&payload.star_rating) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_rating",
                "message": "Star rating must be between 1 and 5"
            })),
        )
            .into_response();
    }

    let repo = HotelRepository::new((*state.db).clone());
    match repo
        .create(
            &payload.city,
            &payload.name,
            payload.star_rating,
            payload.address.as_deref(),
        )
        .await
    {
        Ok(hotel) => {
            info!(hotel_id = %hotel.id, name = %hotel.name, "Hotel created");
            (StatusCode::CREATED, Json(json!(hotel))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create hotel");
            internal_error()
        }
    }
}

/// GET `/hotels/{hotel_id}` - Get a hotel with its room rates.
async fn get_hotel(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(hotel_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    let repo = HotelRepository::new((*state.db).clone());
    match repo.find_with_rates(hotel_id).await {
        Ok(Some((hotel, rates))) => (
            StatusCode::OK,
            Json(json!({
                "id": hotel.id,
                "city": hotel.city,
                "name": hotel.name,
                "star_rating": hotel.star_rating,
                "address": hotel.address,
                "is_active": hotel.is_active,
                "rates": rates,
                "created_at": hotel.created_at,
                "updated_at": hotel.updated_at
            })),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Hotel not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error loading hotel");
            internal_error()
        }
    }
}

/// Upsert payload for room rates.
#[derive(Debug, Deserialize)]
struct UpsertRateRequest {
    season: String,
    room_type: String,
    rate_per_night: Decimal,
    #[serde(default = "default_currency")]
    currency: String,
}

fn default_currency() -> String {
    "INR".to_string()
}

/// PUT `/hotels/{hotel_id}/rates` - Upsert a seasonal room rate (back office).
async fn upsert_rate(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(hotel_id): Path<uuid::Uuid>,
    Json(payload): Json<UpsertRateRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to manage inventory");
    }

    if payload.rate_per_night < Decimal::ZERO {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_amount",
                "message": "Rate must be non-negative"
            })),
        )
            .into_response();
    }

    let repo = HotelRepository::new((*state.db).clone());

    // The hotel must exist
    match repo.find_with_rates(hotel_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "not_found",
                    "message": "Hotel not found"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error checking hotel");
            return internal_error();
        }
    }

    match repo
        .upsert_rate(
            hotel_id,
            &payload.season,
            &payload.room_type,
            payload.rate_per_night,
            &payload.currency,
        )
        .await
    {
        Ok(rate) => {
            info!(hotel_id = %hotel_id, season = %rate.season, room_type = %rate.room_type, "Room rate upserted");
            (StatusCode::OK, Json(json!(rate))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to upsert room rate");
            internal_error()
        }
    }
}

/// DELETE `/hotels/{hotel_id}` - Deactivate a hotel (back office).
async fn deactivate_hotel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(hotel_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to manage inventory");
    }

    let repo = HotelRepository::new((*state.db).clone());
    match repo.deactivate(hotel_id).await {
        Ok(()) => {
            info!(hotel_id = %hotel_id, "Hotel deactivated");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(sea_orm::DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Hotel not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to deactivate hotel");
            internal_error()
        }
    }
}
