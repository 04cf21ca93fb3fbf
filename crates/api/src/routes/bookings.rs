//! Sales booking routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser, middleware::auth::forbidden};
use triplexa_db::BookingRepository;
use triplexa_db::entities::sea_orm_active_enums::{BookingStatus, PaymentStatus};
use triplexa_db::repositories::booking::BookingError;
use triplexa_shared::types::PageRequest;

/// Creates the bookings router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings))
        .route("/bookings/{booking_id}", get(get_booking))
        .route("/bookings/{booking_id}/status", post(update_status))
        .route("/bookings/{booking_id}/payment", post(update_payment))
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

fn string_to_status(s: &str) -> Option<BookingStatus> {
    match s.to_lowercase().as_str() {
        "confirmed" => Some(BookingStatus::Confirmed),
        "completed" => Some(BookingStatus::Completed),
        "cancelled" => Some(BookingStatus::Cancelled),
        _ => None,
    }
}

fn string_to_payment(s: &str) -> Option<PaymentStatus> {
    match s.to_lowercase().as_str() {
        "unpaid" => Some(PaymentStatus::Unpaid),
        "partial" => Some(PaymentStatus::Partial),
        "paid" => Some(PaymentStatus::Paid),
        _ => None,
    }
}

/// Query parameters for booking listing.
#[derive(Debug, Deserialize)]
struct ListQuery {
    status: Option<String>,
}

/// GET /bookings - List bookings (back office).
async fn list_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to view bookings");
    }

    let status = match query.status.as_deref() {
        Some(raw) => match string_to_status(raw) {
            Some(s) => Some(s),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_status",
                        "message": "Invalid status filter. Must be one of: confirmed, completed, cancelled"
                    })),
                )
                    .into_response();
            }
        },
        None => None,
    };

    let repo = BookingRepository::new((*state.db).clone());
    match repo
        .list(status, page.offset(), page.limit())
        .await
    {
        Ok((bookings, total)) => (
            StatusCode::OK,
            Json(json!({
                "data": bookings,
                "meta": {
                    "page": page.page,
                    "per_page": page.per_page,
                    "total": total
                }
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error listing bookings");
            internal_error()
        }
    }
}

/// GET `/bookings/{booking_id}` - Get a booking (back office).
async fn get_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to view bookings");
    }

    let repo = BookingRepository::new((*state.db).clone());
    match repo.find_by_id(booking_id).await {
        Ok(Some(booking)) => (StatusCode::OK, Json(json!(booking))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Booking not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error loading booking");
            internal_error()
        }
    }
}

/// Status change payload.
#[derive(Debug, Deserialize)]
struct StatusRequest {
    status: String,
}

/// POST `/bookings/{booking_id}/status` - Complete or cancel a booking (back office).
async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<uuid::Uuid>,
    Json(payload): Json<StatusRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to update bookings");
    }

    let Some(status) = string_to_status(&payload.status) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_status",
                "message": "Invalid status. Must be one of: confirmed, completed, cancelled"
            })),
        )
            .into_response();
    };

    let repo = BookingRepository::new((*state.db).clone());
    match repo.update_status(booking_id, status).await {
        Ok(booking) => {
            info!(booking_id = %booking_id, status = %payload.status, "Booking status updated");
            (StatusCode::OK, Json(json!(booking))).into_response()
        }
        Err(BookingError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Booking not found"
            })),
        )
            .into_response(),
        Err(BookingError::Pipeline(e)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "invalid_transition",
                "message": e.to_string()
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to update booking status");
            internal_error()
        }
    }
}

/// Payment change payload.
#[derive(Debug, Deserialize)]
struct PaymentRequest {
    payment_status: String,
}

/// POST `/bookings/{booking_id}/payment` - Record a payment status change
/// (back office).
async fn update_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<uuid::Uuid>,
    Json(payload): Json<PaymentRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to update bookings");
    }

    let Some(payment_status) = string_to_payment(&payload.payment_status) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_payment_status",
                "message": "Invalid payment status. Must be one of: unpaid, partial, paid"
            })),
        )
            .into_response();
    };

    let repo = BookingRepository::new((*state.db).clone());
    match repo.set_payment_status(booking_id, payment_status).await {
        Ok(booking) => {
            info!(
                booking_id = %booking_id,
                payment_status = %payload.payment_status,
                "Booking payment updated"
            );
            (StatusCode::OK, Json(json!(booking))).into_response()
        }
        Err(sea_orm::DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Booking not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to update booking payment");
            internal_error()
        }
    }
}
