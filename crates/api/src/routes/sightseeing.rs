//! Sightseeing inventory routes.

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
use triplexa_db::SightseeingRepository;
use triplexa_db::repositories::sightseeing::SightseeingInput;
use triplexa_shared::types::PageRequest;

/// Creates the sightseeing router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sightseeing", get(list_options))
        .route("/sightseeing", post(create_option))
        .route("/sightseeing/{option_id}", get(get_option))
        .route("/sightseeing/{option_id}", put(update_option))
        .route(
            "/sightseeing/{option_id}",
            axum::routing::delete(deactivate_option),
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
struct OptionRequest {
    city: String,
    name: String,
    description: Option<String>,
    ticket_cost: Decimal,
    #[serde(default = "default_currency")]
    currency: String,
    duration_minutes: i32,
}

fn default_currency() -> String {
    "INR".to_string()
}

impl OptionRequest {
    fn validate(&self) -> Option<axum::response::Response> {
        if self.ticket_cost < Decimal::ZERO {
            return Some(
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_amount",
                        "message": "Ticket cost must be non-negative"
                    })),
                )
                    .into_response(),
            );
        }
        if self.duration_minutes <= 0 {
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

    fn into_input(self) -> SightseeingInput {
        SightseeingInput {
            city: self.city,
            name: self.name,
            description: self.description,
            ticket_cost: self.ticket_cost,
            currency: self.currency,
            duration_minutes: self.duration_minutes,
        }
    }
}

/// Query parameters for listing.
#[derive(Debug, Deserialize)]
struct ListQuery {
    city: Option<String>,
}

/// GET /sightseeing - List active options, optionally by city.
async fn list_options(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListQuery>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = SightseeingRepository::new((*state.db).clone());
    match repo
        .list(query.city.as_deref(), page.offset(), page.limit())
        .await
    {
        Ok((options, total)) => (
            StatusCode::OK,
            Json(json!({
                "data": options,
                "meta": {
                    "page": page.page,
                    "per_page": page.per_page,
                    "total": total
                }
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error listing sightseeing options");
            internal_error()
        }
    }
}

/// POST /sightseeing - Create an option (back office).
async fn create_option(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<OptionRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to manage inventory");
    }
    if let Some(resp) = payload.validate() {
        return resp;
    }

    let repo = SightseeingRepository::new((*state.db).clone());
    match repo.create(&payload.into_input()).await {
        Ok(option) => {
            info!(option_id = %option.id, name = %option.name, "Sightseeing option created");
            (StatusCode::CREATED, Json(json!(option))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create sightseeing option");
            internal_error()
        }
    }
}

/// GET `/sightseeing/{option_id}` - Get an option.
async fn get_option(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(option_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    let repo = SightseeingRepository::new((*state.db).clone());
    match repo.find_by_id(option_id).await {
        Ok(Some(option)) => (StatusCode::OK, Json(json!(option))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Sightseeing option not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error loading sightseeing option");
            internal_error()
        }
    }
}

/// PUT `/sightseeing/{option_id}` - Update an option (back office).
async fn update_option(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(option_id): Path<uuid::Uuid>,
    Json(payload): Json<OptionRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to manage inventory");
    }
    if let Some(resp) = payload.validate() {
        return resp;
    }

    let repo = SightseeingRepository::new((*state.db).clone());
    match repo.update(option_id, &payload.into_input()).await {
        Ok(option) => {
            info!(option_id = %option_id, "Sightseeing option updated");
            (StatusCode::OK, Json(json!(option))).into_response()
        }
        Err(sea_orm::DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Sightseeing option not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to update sightseeing option");
            internal_error()
        }
    }
}

/// DELETE `/sightseeing/{option_id}` - Deactivate an option (back office).
async fn deactivate_option(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(option_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to manage inventory");
    }

    let repo = SightseeingRepository::new((*state.db).clone());
    match repo.deactivate(option_id).await {
        Ok(()) => {
            info!(option_id = %option_id, "Sightseeing option deactivated");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(sea_orm::DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Sightseeing option not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to deactivate sightseeing option");
            internal_error()
        }
    }
}
