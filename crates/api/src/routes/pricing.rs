//! Pricing configuration routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser, middleware::auth::forbidden};
use triplexa_core::pricing::{MarkupKind, MarkupSlab, PricingService};
use triplexa_db::PricingRepository;
use triplexa_db::entities::sea_orm_active_enums;
use triplexa_db::repositories::pricing::{PricingRepoError, SlabInput, slabs_to_core};
use triplexa_shared::types::{Currency, Money};

/// Creates the pricing router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pricing/configurations", get(list_configs))
        .route("/pricing/configurations", post(create_config))
        .route("/pricing/configurations/{config_id}", get(get_config))
        .route(
            "/pricing/configurations/{config_id}/activate",
            post(activate_config),
        )
        .route(
            "/pricing/configurations/{config_id}/slabs",
            put(replace_slabs),
        )
        .route("/pricing/preview", post(preview))
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

/// One slab of a configuration payload.
#[derive(Debug, Deserialize)]
struct SlabRequest {
    min_amount: Decimal,
    max_amount: Option<Decimal>,
    markup_kind: String,
    markup_value: Decimal,
}

/// Parses and validates payload slabs into repository inputs.
fn parse_slabs(slabs: &[SlabRequest]) -> Result<Vec<SlabInput>, axum::response::Response> {
    let mut core_slabs = Vec::with_capacity(slabs.len());
    let mut inputs = Vec::with_capacity(slabs.len());

    for slab in slabs {
        let Some(kind) = MarkupKind::parse(&slab.markup_kind) else {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_markup_kind",
                    "message": format!(
                        "Unknown markup kind: {}. Must be percentage or fixed",
                        slab.markup_kind
                    )
                })),
            )
                .into_response());
        };

        core_slabs.push(MarkupSlab {
            min_amount: slab.min_amount,
            max_amount: slab.max_amount,
            kind,
            value: slab.markup_value,
        });
        inputs.push(SlabInput {
            min_amount: slab.min_amount,
            max_amount: slab.max_amount,
            markup_kind: match kind {
                MarkupKind::Percentage => sea_orm_active_enums::MarkupKind::Percentage,
                MarkupKind::Fixed => sea_orm_active_enums::MarkupKind::Fixed,
            },
            markup_value: slab.markup_value,
        });
    }

    if let Err(e) = PricingService::validate_slabs(&core_slabs) {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "invalid_slabs",
                "message": e.to_string()
            })),
        )
            .into_response());
    }

    Ok(inputs)
}

/// GET /pricing/configurations - List configurations (admin).
async fn list_configs(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if !auth.is_admin() {
        return forbidden("You need admin role to manage pricing");
    }

    let repo = PricingRepository::new((*state.db).clone());
    match repo.list().await {
        Ok(configs) => (StatusCode::OK, Json(json!({ "data": configs }))).into_response(),
        Err(e) => {
            error!(error = %e, "Database error listing pricing configurations");
            internal_error()
        }
    }
}

/// Create payload for configurations.
#[derive(Debug, Deserialize)]
struct CreateConfigRequest {
    name: String,
    #[serde(default = "default_currency")]
    currency: String,
    slabs: Vec<SlabRequest>,
}

fn default_currency() -> String {
    "INR".to_string()
}

/// POST /pricing/configurations - Create a configuration (admin).
async fn create_config(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateConfigRequest>,
) -> impl IntoResponse {
    if !auth.is_admin() {
        return forbidden("You need admin role to manage pricing");
    }

    let inputs = match parse_slabs(&payload.slabs) {
        Ok(inputs) => inputs,
        Err(resp) => return resp,
    };

    let repo = PricingRepository::new((*state.db).clone());
    match repo
        .create_with_slabs(&payload.name, &payload.currency, &inputs)
        .await
    {
        Ok((config, slabs)) => {
            info!(config_id = %config.id, name = %config.name, "Pricing configuration created");
            (
                StatusCode::CREATED,
                Json(json!({ "config": config, "slabs": slabs })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create pricing configuration");
            internal_error()
        }
    }
}

/// GET `/pricing/configurations/{config_id}` - Get a configuration (admin).
async fn get_config(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(config_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    if !auth.is_admin() {
        return forbidden("You need admin role to manage pricing");
    }

    let repo = PricingRepository::new((*state.db).clone());
    match repo.find_with_slabs(config_id).await {
        Ok((config, slabs)) => (
            StatusCode::OK,
            Json(json!({ "config": config, "slabs": slabs })),
        )
            .into_response(),
        Err(PricingRepoError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Pricing configuration not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error loading pricing configuration");
            internal_error()
        }
    }
}

/// POST `/pricing/configurations/{config_id}/activate` - Make a
/// configuration the active one (admin).
async fn activate_config(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(config_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    if !auth.is_admin() {
        return forbidden("You need admin role to manage pricing");
    }

    let repo = PricingRepository::new((*state.db).clone());
    match repo.activate(config_id).await {
        Ok(config) => {
            info!(config_id = %config_id, activated_by = %auth.user_id(), "Pricing configuration activated");
            (StatusCode::OK, Json(json!(config))).into_response()
        }
        Err(PricingRepoError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Pricing configuration not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to activate pricing configuration");
            internal_error()
        }
    }
}

/// Replace payload for slabs.
#[derive(Debug, Deserialize)]
struct ReplaceSlabsRequest {
    slabs: Vec<SlabRequest>,
}

/// PUT `/pricing/configurations/{config_id}/slabs` - Replace a
/// configuration's slabs (admin).
async fn replace_slabs(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(config_id): Path<uuid::Uuid>,
    Json(payload): Json<ReplaceSlabsRequest>,
) -> impl IntoResponse {
    if !auth.is_admin() {
        return forbidden("You need admin role to manage pricing");
    }

    let inputs = match parse_slabs(&payload.slabs) {
        Ok(inputs) => inputs,
        Err(resp) => return resp,
    };

    let repo = PricingRepository::new((*state.db).clone());
    match repo.replace_slabs(config_id, &inputs).await {
        Ok(slabs) => {
            info!(config_id = %config_id, count = slabs.len(), "Pricing slabs replaced");
            (StatusCode::OK, Json(json!({ "slabs": slabs }))).into_response()
        }
        Err(PricingRepoError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Pricing configuration not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to replace pricing slabs");
            internal_error()
        }
    }
}

/// Preview payload.
#[derive(Debug, Deserialize)]
struct PreviewRequest {
    base_amount: Decimal,
    #[serde(default = "default_currency")]
    currency: String,
}

/// POST /pricing/preview - Apply the active configuration to an amount
/// (back office).
async fn preview(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<PreviewRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to preview pricing");
    }

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

    let repo = PricingRepository::new((*state.db).clone());
    let (config, rows) = match repo.active_config_with_slabs().await {
        Ok(pair) => pair,
        Err(PricingRepoError::NoActiveConfig) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": "no_active_pricing",
                    "message": "No active pricing configuration"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error loading pricing configuration");
            return internal_error();
        }
    };

    let slabs = slabs_to_core(&rows);
    match PricingService::apply_markup(Money::new(payload.base_amount, currency), &slabs) {
        Ok(priced) => (
            StatusCode::OK,
            Json(json!({
                "config_id": config.id,
                "base_amount": priced.base.amount,
                "markup": priced.markup,
                "total": priced.total.amount,
                "currency": priced.total.currency,
                "slab": rows.get(priced.slab_index)
            })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "pricing_failed",
                "message": e.to_string()
            })),
        )
            .into_response(),
    }
}
