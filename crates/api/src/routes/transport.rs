//! Transport inventory routes.

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
use triplexa_db::TransportRepository;
use triplexa_db::repositories::transport::RouteInput;
use triplexa_shared::types::PageRequest;

/// Creates the transport router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transport/types", get(list_types))
        .route("/transport/types", post(create_type))
        .route("/transport/routes", get(list_routes))
        .route("/transport/routes", post(create_route))
        .route("/transport/routes/{route_id}", get(get_route))
        .route("/transport/routes/{route_id}", put(update_route))
        .route(
            "/transport/routes/{route_id}",
            axum::routing::delete(deactivate_route),
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

fn route_json(
    route: &triplexa_db::entities::transport_routes::Model,
    stops: &[triplexa_db::entities::intermediate_stops::Model],
) -> serde_json::Value {
    json!({
        "id": route.id,
        "origin": route.origin,
        "destination": route.destination,
        "transport_type_id": route.transport_type_id,
        "distance_km": route.distance_km,
        "duration_minutes": route.duration_minutes,
        "base_fare": route.base_fare,
        "currency": route.currency,
        "is_active": route.is_active,
        "stops": stops.iter().map(|s| json!({
            "id": s.id,
            "name": s.name,
            "position": s.position
        })).collect::<Vec<_>>(),
        "created_at": route.created_at,
        "updated_at": route.updated_at
    })
}

/// GET /transport/types - List vehicle types.
async fn list_types(State(state): State<AppState>, _auth: AuthUser) -> impl IntoResponse {
    let repo = TransportRepository::new((*state.db).clone());
    match repo.list_types().await {
        Ok(types) => (StatusCode::OK, Json(json!({ "data": types }))).into_response(),
        Err(e) => {
            error!(error = %e, "Database error listing transport types");
            internal_error()
        }
    }
}

/// Create payload for transport types.
#[derive(Debug, Deserialize)]
struct CreateTypeRequest {
    name: String,
    vehicle_class: Option<String>,
    seats: i32,
}

/// POST /transport/types - Create a vehicle type (back office).
async fn create_type(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateTypeRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to manage inventory");
    }

    if payload.seats <= 0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_seats",
                "message": "Seat count must be positive"
            })),
        )
            .into_response();
    }

    let repo = TransportRepository::new((*state.db).clone());
    match repo
        .create_type(&payload.name, payload.vehicle_class.as_deref(), payload.seats)
        .await
    {
        Ok(t) => {
            info!(type_id = %t.id, name = %t.name, "Transport type created");
            (StatusCode::CREATED, Json(json!(t))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create transport type");
            internal_error()
        }
    }
}

/// Query parameters for route listing.
#[derive(Debug, Deserialize)]
struct RouteListQuery {
    origin: Option<String>,
    destination: Option<String>,
}

/// GET /transport/routes - List active routes.
async fn list_routes(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<RouteListQuery>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = TransportRepository::new((*state.db).clone());
    match repo
        .list_routes(
            query.origin.as_deref(),
            query.destination.as_deref(),
            page.offset(),
            page.limit(),
        )
        .await
    {
        Ok((routes, total)) => (
            StatusCode::OK,
            Json(json!({
                "data": routes,
                "meta": {
                    "page": page.page,
                    "per_page": page.per_page,
                    "total": total
                }
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error listing routes");
            internal_error()
        }
    }
}

/// Create/update payload for routes.
#[derive(Debug, Deserialize)]
struct RouteRequest {
    origin: String,
    destination: String,
    transport_type_id: uuid::Uuid,
    distance_km: Decimal,
    duration_minutes: i32,
    base_fare: Decimal,
    #[serde(default = "default_currency")]
    currency: String,
    #[serde(default)]
    stops: Vec<String>,
}

fn default_currency() -> String {
    "INR".to_string()
}

fn validate_route(payload: &RouteRequest) -> Option<axum::response::Response> {
    if payload.base_fare < Decimal::ZERO || payload.distance_km < Decimal::ZERO {
        return Some(
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_amount",
                    "message": "Fare and distance must be non-negative"
                })),
            )
                .into_response(),
        );
    }
    if payload.duration_minutes <= 0 {
        return Some(
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_duration",
                    "message": "Duration must be positive"
                })),
            )
                .into_response(),
        );
    }
    None
}

impl RouteRequest {
    fn into_input(self) -> RouteInput {
        RouteInput {
            origin: self.origin,
            destination: self.destination,
            transport_type_id: self.transport_type_id,
            distance_km: self.distance_km,
            duration_minutes: self.duration_minutes,
            base_fare: self.base_fare,
            currency: self.currency,
            stops: self.stops,
        }
    }
}

/// POST /transport/routes - Create a route with stops (back office).
async fn create_route(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<RouteRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to manage inventory");
    }
    if let Some(resp) = validate_route(&payload) {
        return resp;
    }

    let repo = TransportRepository::new((*state.db).clone());

    // The referenced vehicle type must exist
    match repo.find_type(payload.transport_type_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "unknown_transport_type",
                    "message": "The referenced transport type does not exist"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error checking transport type");
            return internal_error();
        }
    }

    match repo.create_route(&payload.into_input()).await {
        Ok((route, stops)) => {
            info!(route_id = %route.id, origin = %route.origin, destination = %route.destination, "Route created");
            (StatusCode::CREATED, Json(route_json(&route, &stops))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create route");
            internal_error()
        }
    }
}

/// GET `/transport/routes/{route_id}` - Get a route with its stops.
async fn get_route(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(route_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    let repo = TransportRepository::new((*state.db).clone());
    match repo.find_route_with_stops(route_id).await {
        Ok(Some((route, stops))) => {
            (StatusCode::OK, Json(route_json(&route, &stops))).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Route not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error loading route");
            internal_error()
        }
    }
}

/// PUT `/transport/routes/{route_id}` - Replace a route and its stops (back office).
async fn update_route(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(route_id): Path<uuid::Uuid>,
    Json(payload): Json<RouteRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to manage inventory");
    }
    if let Some(resp) = validate_route(&payload) {
        return resp;
    }

    let repo = TransportRepository::new((*state.db).clone());
    match repo.update_route(route_id, &payload.into_input()).await {
        Ok((route, stops)) => {
            info!(route_id = %route_id, "Route updated");
            (StatusCode::OK, Json(route_json(&route, &stops))).into_response()
        }
        Err(sea_orm::DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Route not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to update route");
            internal_error()
        }
    }
}

/// DELETE `/transport/routes/{route_id}` - Deactivate a route (back office).
async fn deactivate_route(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(route_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to manage inventory");
    }

    let repo = TransportRepository::new((*state.db).clone());
    match repo.deactivate_route(route_id).await {
        Ok(()) => {
            info!(route_id = %route_id, "Route deactivated");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(sea_orm::DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Route not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to deactivate route");
            internal_error()
        }
    }
}
