//! Sales lead routes.

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
use triplexa_db::entities::sea_orm_active_enums::LeadStatus;
use triplexa_db::repositories::enquiry::{EnquiryError, EnquiryInput};
use triplexa_db::repositories::lead::{LeadError, LeadInput};
use triplexa_db::{EnquiryRepository, LeadRepository};
use triplexa_shared::types::PageRequest;

/// Creates the leads router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leads", get(list_leads))
        .route("/leads", post(create_lead))
        .route("/leads/{lead_id}", get(get_lead))
        .route("/leads/{lead_id}/status", post(update_status))
        .route("/leads/{lead_id}/assign", post(assign_lead))
        .route("/leads/{lead_id}/convert", post(convert_lead))
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

fn string_to_status(s: &str) -> Option<LeadStatus> {
    match s.to_lowercase().as_str() {
        "new" => Some(LeadStatus::New),
        "contacted" => Some(LeadStatus::Contacted),
        "qualified" => Some(LeadStatus::Qualified),
        "lost" => Some(LeadStatus::Lost),
        _ => None,
    }
}

/// Create payload for leads.
#[derive(Debug, Deserialize)]
struct CreateLeadRequest {
    customer_name: String,
    customer_phone: Option<String>,
    customer_email: Option<String>,
    source: Option<String>,
    destination: Option<String>,
    travel_start: Option<chrono::NaiveDate>,
    travel_end: Option<chrono::NaiveDate>,
    #[serde(default = "default_adults")]
    adults: i32,
    #[serde(default)]
    children: i32,
    notes: Option<String>,
}

fn default_adults() -> i32 {
    1
}

/// Query parameters for lead listing.
#[derive(Debug, Deserialize)]
struct ListQuery {
    status: Option<String>,
}

/// GET /leads - List leads (back office).
async fn list_leads(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to view leads");
    }

    let status = match query.status.as_deref() {
        Some(raw) => match string_to_status(raw) {
            Some(s) => Some(s),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_status",
                        "message": "Invalid status filter. Must be one of: new, contacted, qualified, lost"
                    })),
                )
                    .into_response();
            }
        },
        None => None,
    };

    let repo = LeadRepository::new((*state.db).clone());
    match repo
        .list(status, page.offset(), page.limit())
        .await
    {
        Ok((leads, total)) => (
            StatusCode::OK,
            Json(json!({
                "data": leads,
                "meta": {
                    "page": page.page,
                    "per_page": page.per_page,
                    "total": total
                }
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error listing leads");
            internal_error()
        }
    }
}

/// POST /leads - Create a lead (back office).
async fn create_lead(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateLeadRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to create leads");
    }

    if payload.adults < 0 || payload.children < 0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_pax",
                "message": "Traveller counts must be non-negative"
            })),
        )
            .into_response();
    }

    let input = LeadInput {
        customer_name: payload.customer_name,
        customer_phone: payload.customer_phone,
        customer_email: payload.customer_email,
        source: payload.source,
        destination: payload.destination,
        travel_start: payload.travel_start,
        travel_end: payload.travel_end,
        adults: payload.adults,
        children: payload.children,
        notes: payload.notes,
    };

    let repo = LeadRepository::new((*state.db).clone());
    match repo.create(&input).await {
        Ok(lead) => {
            info!(lead_id = %lead.id, customer = %lead.customer_name, "Lead created");
            (StatusCode::CREATED, Json(json!(lead))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create lead");
            internal_error()
        }
    }
}

/// GET `/leads/{lead_id}` - Get a lead (back office).
async fn get_lead(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(lead_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to view leads");
    }

    let repo = LeadRepository::new((*state.db).clone());
    match repo.find_by_id(lead_id).await {
        Ok(Some(lead)) => (StatusCode::OK, Json(json!(lead))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Lead not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error loading lead");
            internal_error()
        }
    }
}

/// Status change payload.
#[derive(Debug, Deserialize)]
struct StatusRequest {
    status: String,
}

/// POST `/leads/{lead_id}/status` - Move a lead through the pipeline (back office).
async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(lead_id): Path<uuid::Uuid>,
    Json(payload): Json<StatusRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to update leads");
    }

    let Some(status) = string_to_status(&payload.status) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_status",
                "message": "Invalid status. Must be one of: new, contacted, qualified, lost"
            })),
        )
            .into_response();
    };

    let repo = LeadRepository::new((*state.db).clone());
    match repo.update_status(lead_id, status).await {
        Ok(lead) => {
            info!(lead_id = %lead_id, status = %payload.status, "Lead status updated");
            (StatusCode::OK, Json(json!(lead))).into_response()
        }
        Err(LeadError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Lead not found"
            })),
        )
            .into_response(),
        Err(LeadError::Pipeline(e)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "invalid_transition",
                "message": e.to_string()
            })),
        )
            .into_response(),
        Err(LeadError::Db(e)) => {
            error!(error = %e, "Failed to update lead status");
            internal_error()
        }
    }
}

/// Assignment payload.
#[derive(Debug, Deserialize)]
struct AssignRequest {
    profile_id: Option<uuid::Uuid>,
}

/// POST `/leads/{lead_id}/assign` - Assign a lead to a staff profile (back office).
async fn assign_lead(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(lead_id): Path<uuid::Uuid>,
    Json(payload): Json<AssignRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to assign leads");
    }

    let repo = LeadRepository::new((*state.db).clone());
    match repo.assign(lead_id, payload.profile_id).await {
        Ok(lead) => {
            info!(lead_id = %lead_id, "Lead assignment updated");
            (StatusCode::OK, Json(json!(lead))).into_response()
        }
        Err(sea_orm::DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Lead not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to assign lead");
            internal_error()
        }
    }
}

/// Conversion payload: the enquiry details to create.
#[derive(Debug, Deserialize)]
struct ConvertLeadRequest {
    destination: String,
    requirements: Option<serde_json::Value>,
    travel_start: Option<chrono::NaiveDate>,
    travel_end: Option<chrono::NaiveDate>,
    adults: Option<i32>,
    children: Option<i32>,
}

/// POST `/leads/{lead_id}/convert` - Convert a qualified lead into an enquiry
/// (back office).
async fn convert_lead(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(lead_id): Path<uuid::Uuid>,
    Json(payload): Json<ConvertLeadRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to convert leads");
    }

    let lead_repo = LeadRepository::new((*state.db).clone());
    let lead = match lead_repo.find_by_id(lead_id).await {
        Ok(Some(l)) => l,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "not_found",
                    "message": "Lead not found"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error loading lead");
            return internal_error();
        }
    };

    let input = EnquiryInput {
        customer_name: lead.customer_name.clone(),
        destination: payload.destination,
        requirements: payload.requirements,
        travel_start: payload.travel_start.or(lead.travel_start),
        travel_end: payload.travel_end.or(lead.travel_end),
        adults: payload.adults.unwrap_or(lead.adults),
        children: payload.children.unwrap_or(lead.children),
    };

    let enquiry_repo = EnquiryRepository::new((*state.db).clone());
    match enquiry_repo.create_from_lead(lead_id, &input).await {
        Ok(enquiry) => {
            info!(lead_id = %lead_id, enquiry_id = %enquiry.id, "Lead converted to enquiry");
            (StatusCode::CREATED, Json(json!(enquiry))).into_response()
        }
        Err(EnquiryError::LeadNotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Lead not found"
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
        Err(EnquiryError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Enquiry not found"
            })),
        )
            .into_response(),
        Err(EnquiryError::Db(e)) => {
            error!(error = %e, "Failed to convert lead");
            internal_error()
        }
    }
}
