//! Sales enquiry routes.

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
use triplexa_db::entities::sea_orm_active_enums::EnquiryStatus;
use triplexa_db::repositories::booking::BookingError;
use triplexa_db::repositories::enquiry::{EnquiryError, EnquiryInput};
use triplexa_db::{BookingRepository, EnquiryRepository};
use triplexa_shared::types::PageRequest;

/// Creates the enquiries router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/enquiries", get(list_enquiries))
        .route("/enquiries", post(create_enquiry))
        .route("/enquiries/{enquiry_id}", get(get_enquiry))
        .route("/enquiries/{enquiry_id}/status", post(update_status))
        .route("/enquiries/{enquiry_id}/assign", post(assign_enquiry))
        .route("/enquiries/{enquiry_id}/convert", post(convert_enquiry))
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

fn string_to_status(s: &str) -> Option<EnquiryStatus> {
    match s.to_lowercase().as_str() {
        "open" => Some(EnquiryStatus::Open),
        "quoted" => Some(EnquiryStatus::Quoted),
        "won" => Some(EnquiryStatus::Won),
        "lost" => Some(EnquiryStatus::Lost),
        _ => None,
    }
}

/// Create payload for enquiries.
#[derive(Debug, Deserialize)]
struct CreateEnquiryRequest {
    customer_name: String,
    destination: String,
    requirements: Option<serde_json::Value>,
    travel_start: Option<chrono::NaiveDate>,
    travel_end: Option<chrono::NaiveDate>,
    #[serde(default = "default_adults")]
    adults: i32,
    #[serde(default)]
    children: i32,
}

fn default_adults() -> i32 {
    1
}

/// Query parameters for enquiry listing.
#[derive(Debug, Deserialize)]
struct ListQuery {
    status: Option<String>,
}

/// GET /enquiries - List enquiries (back office).
async fn list_enquiries(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to view enquiries");
    }

    let status = match query.status.as_deref() {
        Some(raw) => match string_to_status(raw) {
            Some(s) => Some(s),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_status",
                        "message": "Invalid status filter. Must be one of: open, quoted, won, lost"
                    })),
                )
                    .into_response();
            }
        },
        None => None,
    };

    let repo = EnquiryRepository::new((*state.db).clone());
    match repo
        .list(status, page.offset(), page.limit())
        .await
    {
        Ok((enquiries, total)) => (
            StatusCode::OK,
            Json(json!({
                "data": enquiries,
                "meta": {
                    "page": page.page,
                    "per_page": page.per_page,
                    "total": total
                }
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error listing enquiries");
            internal_error()
        }
    }
}

/// POST /enquiries - Create a standalone enquiry (back office).
async fn create_enquiry(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateEnquiryRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to create enquiries");
    }

    let input = EnquiryInput {
        customer_name: payload.customer_name,
        destination: payload.destination,
        requirements: payload.requirements,
        travel_start: payload.travel_start,
        travel_end: payload.travel_end,
        adults: payload.adults,
        children: payload.children,
    };

    let repo = EnquiryRepository::new((*state.db).clone());
    match repo.create(&input).await {
        Ok(enquiry) => {
            info!(enquiry_id = %enquiry.id, customer = %enquiry.customer_name, "Enquiry created");
            (StatusCode::CREATED, Json(json!(enquiry))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create enquiry");
            internal_error()
        }
    }
}

/// GET `/enquiries/{enquiry_id}` - Get an enquiry (back office).
async fn get_enquiry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(enquiry_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to view enquiries");
    }

    let repo = EnquiryRepository::new((*state.db).clone());
    match repo.find_by_id(enquiry_id).await {
        Ok(Some(enquiry)) => (StatusCode::OK, Json(json!(enquiry))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Enquiry not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error loading enquiry");
            internal_error()
        }
    }
}

/// Status change payload.
#[derive(Debug, Deserialize)]
struct StatusRequest {
    status: String,
}

/// POST `/enquiries/{enquiry_id}/status` - Move an enquiry through the
/// pipeline (back office).
async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(enquiry_id): Path<uuid::Uuid>,
    Json(payload): Json<StatusRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to update enquiries");
    }

    let Some(status) = string_to_status(&payload.status) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_status",
                "message": "Invalid status. Must be one of: open, quoted, won, lost"
            })),
        )
            .into_response();
    };

    let repo = EnquiryRepository::new((*state.db).clone());
    match repo.update_status(enquiry_id, status).await {
        Ok(enquiry) => {
            info!(enquiry_id = %enquiry_id, status = %payload.status, "Enquiry status updated");
            (StatusCode::OK, Json(json!(enquiry))).into_response()
        }
        Err(EnquiryError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Enquiry not found"
            })),
        )
            .into_response(),
        Err(EnquiryError::Pipeline(e)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "invalid_transition",
                "message": e.to_string()
            })),
        )
            .into_response(),
        Err(EnquiryError::LeadNotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Lead not found"
            })),
        )
            .into_response(),
        Err(EnquiryError::Db(e)) => {
            error!(error = %e, "Failed to update enquiry status");
            internal_error()
        }
    }
}

/// Assignment payload.
#[derive(Debug, Deserialize)]
struct AssignRequest {
    profile_id: Option<uuid::Uuid>,
}

/// POST `/enquiries/{enquiry_id}/assign` - Assign an enquiry to a staff
/// profile (back office).
async fn assign_enquiry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(enquiry_id): Path<uuid::Uuid>,
    Json(payload): Json<AssignRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to assign enquiries");
    }

    let repo = EnquiryRepository::new((*state.db).clone());
    match repo.assign(enquiry_id, payload.profile_id).await {
        Ok(enquiry) => {
            info!(enquiry_id = %enquiry_id, "Enquiry assignment updated");
            (StatusCode::OK, Json(json!(enquiry))).into_response()
        }
        Err(sea_orm::DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Enquiry not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to assign enquiry");
            internal_error()
        }
    }
}

/// Conversion payload: the travel window for the booking.
#[derive(Debug, Deserialize)]
struct ConvertEnquiryRequest {
    quote_id: uuid::Uuid,
    travel_start: chrono::NaiveDate,
    travel_end: chrono::NaiveDate,
}

/// POST `/enquiries/{enquiry_id}/convert` - Convert a quoted enquiry with an
/// accepted quote into a booking (back office).
async fn convert_enquiry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(enquiry_id): Path<uuid::Uuid>,
    Json(payload): Json<ConvertEnquiryRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to convert enquiries");
    }

    if payload.travel_end < payload.travel_start {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_travel_window",
                "message": "Travel end must not be before travel start"
            })),
        )
            .into_response();
    }

    // The quote must belong to this enquiry
    let booking_repo = BookingRepository::new((*state.db).clone());
    let quote_repo = triplexa_db::QuoteRepository::new((*state.db).clone());
    match quote_repo.find_with_items(payload.quote_id).await {
        Ok(Some((quote, _))) if quote.enquiry_id == Some(enquiry_id) => {}
        Ok(Some(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "quote_mismatch",
                    "message": "The quote does not belong to this enquiry"
                })),
            )
                .into_response();
        }
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "not_found",
                    "message": "Quote not found"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error loading quote");
            return internal_error();
        }
    }

    match booking_repo
        .create_from_quote(payload.quote_id, payload.travel_start, payload.travel_end)
        .await
    {
        Ok(booking) => {
            info!(
                enquiry_id = %enquiry_id,
                booking_id = %booking.id,
                total = %booking.total_amount,
                "Enquiry converted to booking"
            );
            (StatusCode::CREATED, Json(json!(booking))).into_response()
        }
        Err(BookingError::QuoteNotFound | BookingError::NoEnquiry) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Quote or enquiry not found"
            })),
        )
            .into_response(),
        Err(BookingError::QuoteNotAccepted) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "quote_not_accepted",
                "message": "Only accepted quotes can back a booking"
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
        Err(BookingError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Booking not found"
            })),
        )
            .into_response(),
        Err(BookingError::Db(e)) => {
            error!(error = %e, "Failed to convert enquiry");
            internal_error()
        }
    }
}
