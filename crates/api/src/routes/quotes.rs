//! Quote routes: composition, pricing, and lifecycle.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser, middleware::auth::forbidden};
use triplexa_core::quote::{QuoteError, QuoteItemInput, QuoteItemKind, QuoteService};
use triplexa_db::entities::sea_orm_active_enums::{self, QuoteStatus};
use triplexa_db::repositories::pricing::{PricingRepoError, slabs_to_core};
use triplexa_db::repositories::quote::{QuoteHeader, QuoteItemRecord, QuoteRepoError};
use triplexa_db::{AgentRepository, PricingRepository, ProfileRepository, QuoteRepository};
use triplexa_shared::types::{Currency, PageRequest};

/// Creates the quotes router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/quotes", get(list_quotes))
        .route("/quotes", post(create_quote))
        .route("/quotes/mine", get(list_my_quotes))
        .route("/quotes/{quote_id}", get(get_quote))
        .route("/quotes/{quote_id}/send", post(send_quote))
        .route("/quotes/{quote_id}/accept", post(accept_quote))
        .route("/quotes/{quote_id}/reject", post(reject_quote))
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

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "Quote not found"
        })),
    )
        .into_response()
}

fn string_to_status(s: &str) -> Option<QuoteStatus> {
    match s.to_lowercase().as_str() {
        "draft" => Some(QuoteStatus::Draft),
        "sent" => Some(QuoteStatus::Sent),
        "accepted" => Some(QuoteStatus::Accepted),
        "rejected" => Some(QuoteStatus::Rejected),
        _ => None,
    }
}

fn quote_json(
    quote: &triplexa_db::entities::quotes::Model,
    items: &[triplexa_db::entities::quote_items::Model],
) -> serde_json::Value {
    json!({
        "id": quote.id,
        "enquiry_id": quote.enquiry_id,
        "agent_id": quote.agent_id,
        "customer_name": quote.customer_name,
        "currency": quote.currency,
        "status": quote.status,
        "subtotal": quote.subtotal,
        "markup_amount": quote.markup_amount,
        "total_amount": quote.total_amount,
        "items": items,
        "created_at": quote.created_at,
        "updated_at": quote.updated_at
    })
}

/// One line of a quote creation request.
#[derive(Debug, Deserialize)]
struct QuoteItemRequest {
    kind: String,
    reference_id: Option<uuid::Uuid>,
    description: String,
    quantity: u32,
    unit_price: Decimal,
}

/// Create payload for quotes.
#[derive(Debug, Deserialize)]
struct CreateQuoteRequest {
    enquiry_id: Option<uuid::Uuid>,
    customer_name: String,
    #[serde(default = "default_currency")]
    currency: String,
    items: Vec<QuoteItemRequest>,
}

fn default_currency() -> String {
    "INR".to_string()
}

/// Query parameters for quote listing.
#[derive(Debug, Deserialize)]
struct ListQuery {
    status: Option<String>,
}

/// GET /quotes - List quotes (back office).
async fn list_quotes(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to list all quotes");
    }

    let status = match query.status.as_deref() {
        Some(raw) => match string_to_status(raw) {
            Some(s) => Some(s),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_status",
                        "message": "Invalid status filter. Must be one of: draft, sent, accepted, rejected"
                    })),
                )
                    .into_response();
            }
        },
        None => None,
    };

    let repo = QuoteRepository::new((*state.db).clone());
    match repo
        .list(status, page.offset(), page.limit())
        .await
    {
        Ok((quotes, total)) => (
            StatusCode::OK,
            Json(json!({
                "data": quotes,
                "meta": {
                    "page": page.page,
                    "per_page": page.per_page,
                    "total": total
                }
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error listing quotes");
            internal_error()
        }
    }
}

/// GET /quotes/mine - List the calling agent's quotes (RLS-scoped).
async fn list_my_quotes(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let agent_repo = AgentRepository::new((*state.db).clone());
    let agent = match agent_repo.find_by_user(auth.user_id()).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            return forbidden("Only managed agents have their own quote list");
        }
        Err(e) => {
            error!(error = %e, "Database error resolving agent");
            return internal_error();
        }
    };

    let repo = QuoteRepository::new((*state.db).clone());
    match repo
        .list_for_agent(agent.id, page.offset(), page.limit())
        .await
    {
        Ok((quotes, total)) => (
            StatusCode::OK,
            Json(json!({
                "data": quotes,
                "meta": {
                    "page": page.page,
                    "per_page": page.per_page,
                    "total": total
                }
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error listing agent quotes");
            internal_error()
        }
    }
}

/// POST /quotes - Compose and price a quote from line items.
///
/// Totals are computed server-side: line totals from quantity and unit
/// price, then the active markup configuration applied to the subtotal.
#[allow(clippy::too_many_lines)]
async fn create_quote(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateQuoteRequest>,
) -> impl IntoResponse {
    // Resolve the caller's profile (creator) and agent row, if any
    let profile_repo = ProfileRepository::new((*state.db).clone());
    let profile = match profile_repo.find_by_user(auth.user_id()).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return forbidden("A profile is required to create quotes");
        }
        Err(e) => {
            error!(error = %e, "Database error resolving profile");
            return internal_error();
        }
    };

    let agent_id = if auth.is_back_office() {
        None
    } else {
        let agent_repo = AgentRepository::new((*state.db).clone());
        match agent_repo.find_by_user(auth.user_id()).await {
            Ok(Some(a)) => Some(a.id),
            Ok(None) => {
                return forbidden("Only back-office staff and managed agents can create quotes");
            }
            Err(e) => {
                error!(error = %e, "Database error resolving agent");
                return internal_error();
            }
        }
    };

    let Ok(currency) = Currency::from_str(&payload.currency) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_currency",
                "message": format!("Unknown currency: {}", payload.currency)
            })),
        )
            .into_response();
    };

    // Parse line items into core inputs
    let mut core_items = Vec::with_capacity(payload.items.len());
    for item in &payload.items {
        let Some(kind) = QuoteItemKind::parse(&item.kind) else {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_item_kind",
                    "message": format!(
                        "Unknown item kind: {}. Must be one of: hotel, transport, sightseeing, restaurant, other",
                        item.kind
                    )
                })),
            )
                .into_response();
        };
        core_items.push(QuoteItemInput {
            kind,
            description: item.description.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
        });
    }

    // Load the active markup configuration
    let pricing_repo = PricingRepository::new((*state.db).clone());
    let slabs = match pricing_repo.active_config_with_slabs().await {
        Ok((_, rows)) => slabs_to_core(&rows),
        Err(PricingRepoError::NoActiveConfig) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": "no_active_pricing",
                    "message": "No active pricing configuration; ask an admin to activate one"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error loading pricing configuration");
            return internal_error();
        }
    };

    // Compute totals
    let totals = match QuoteService::compute_totals(&core_items, currency, &slabs) {
        Ok(t) => t,
        Err(e @ (QuoteError::NoItems
        | QuoteError::ZeroQuantity { .. }
        | QuoteError::NegativeUnitPrice { .. })) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_items",
                    "message": e.to_string()
                })),
            )
                .into_response();
        }
        Err(e) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": "pricing_failed",
                    "message": e.to_string()
                })),
            )
                .into_response();
        }
    };

    let header = QuoteHeader {
        enquiry_id: payload.enquiry_id,
        agent_id,
        customer_name: payload.customer_name.clone(),
        currency: currency.to_string(),
        subtotal: totals.subtotal,
        markup_amount: totals.markup,
        total_amount: totals.total,
        created_by: profile.id,
    };

    let records: Vec<QuoteItemRecord> = payload
        .items
        .iter()
        .zip(totals.line_totals.iter())
        .map(|(item, line_total)| QuoteItemRecord {
            kind: match QuoteItemKind::parse(&item.kind) {
                Some(QuoteItemKind::Hotel) => sea_orm_active_enums::QuoteItemKind::Hotel,
                Some(QuoteItemKind::Transport) => sea_orm_active_enums::QuoteItemKind::Transport,
                Some(QuoteItemKind::Sightseeing) => {
                    sea_orm_active_enums::QuoteItemKind::Sightseeing
                }
                Some(QuoteItemKind::Restaurant) => sea_orm_active_enums::QuoteItemKind::Restaurant,
                _ => sea_orm_active_enums::QuoteItemKind::Other,
            },
            reference_id: item.reference_id,
            description: item.description.clone(),
            quantity: i32::try_from(item.quantity).unwrap_or(i32::MAX),
            unit_price: item.unit_price,
            line_total: *line_total,
        })
        .collect();

    let repo = QuoteRepository::new((*state.db).clone());
    match repo.create_with_items(&header, &records).await {
        Ok((quote, items)) => {
            info!(
                quote_id = %quote.id,
                total = %quote.total_amount,
                created_by = %profile.id,
                "Quote created"
            );
            (StatusCode::CREATED, Json(quote_json(&quote, &items))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create quote");
            internal_error()
        }
    }
}

/// GET `/quotes/{quote_id}` - Get a quote with its items.
///
/// Agents can only see their own quotes.
async fn get_quote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(quote_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    let repo = QuoteRepository::new((*state.db).clone());
    let Some((quote, items)) = (match repo.find_with_items(quote_id).await {
        Ok(found) => found,
        Err(e) => {
            error!(error = %e, "Database error loading quote");
            return internal_error();
        }
    }) else {
        return not_found();
    };

    if !auth.is_back_office() {
        let agent_repo = AgentRepository::new((*state.db).clone());
        let owns = match agent_repo.find_by_user(auth.user_id()).await {
            Ok(Some(agent)) => quote.agent_id == Some(agent.id),
            Ok(None) => false,
            Err(e) => {
                error!(error = %e, "Database error resolving agent");
                return internal_error();
            }
        };
        if !owns {
            // Indistinguishable from a missing quote
            return not_found();
        }
    }

    (StatusCode::OK, Json(quote_json(&quote, &items))).into_response()
}

async fn transition(
    state: &AppState,
    auth: &AuthUser,
    quote_id: uuid::Uuid,
    to: QuoteStatus,
    label: &str,
) -> axum::response::Response {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to change quote status");
    }

    let repo = QuoteRepository::new((*state.db).clone());
    match repo.update_status(quote_id, to).await {
        Ok(quote) => {
            info!(quote_id = %quote_id, status = %label, "Quote status updated");
            (StatusCode::OK, Json(json!(quote))).into_response()
        }
        Err(QuoteRepoError::NotFound) => not_found(),
        Err(QuoteRepoError::Quote(e)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "invalid_transition",
                "message": e.to_string()
            })),
        )
            .into_response(),
        Err(QuoteRepoError::Pipeline(e)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "invalid_transition",
                "message": e.to_string()
            })),
        )
            .into_response(),
        Err(QuoteRepoError::Db(e)) => {
            error!(error = %e, "Failed to update quote status");
            internal_error()
        }
    }
}

/// POST `/quotes/{quote_id}/send` - Mark a quote sent; an open linked
/// enquiry becomes quoted.
async fn send_quote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(quote_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    transition(&state, &auth, quote_id, QuoteStatus::Sent, "sent").await
}

/// POST `/quotes/{quote_id}/accept` - Mark a sent quote accepted.
async fn accept_quote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(quote_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    transition(&state, &auth, quote_id, QuoteStatus::Accepted, "accepted").await
}

/// POST `/quotes/{quote_id}/reject` - Mark a sent quote rejected.
async fn reject_quote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(quote_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    transition(&state, &auth, quote_id, QuoteStatus::Rejected, "rejected").await
}
