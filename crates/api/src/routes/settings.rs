//! App settings routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, put},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser, middleware::auth::forbidden};
use triplexa_db::SettingsRepository;

/// Creates the settings router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/settings", get(list_settings))
        .route("/settings/{key}", get(get_setting))
        .route("/settings/{key}", put(upsert_setting))
        .route("/settings/{key}", delete(delete_setting))
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

/// GET /settings - List all settings (back office).
async fn list_settings(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to view settings");
    }

    let repo = SettingsRepository::new((*state.db).clone());
    match repo.list().await {
        Ok(settings) => (StatusCode::OK, Json(json!({ "data": settings }))).into_response(),
        Err(e) => {
            error!(error = %e, "Database error listing settings");
            internal_error()
        }
    }
}

/// GET `/settings/{key}` - Get a setting (back office).
async fn get_setting(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(key): Path<String>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to view settings");
    }

    let repo = SettingsRepository::new((*state.db).clone());
    match repo.get(&key).await {
        Ok(Some(setting)) => (StatusCode::OK, Json(json!(setting))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("No setting named {key}")
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error loading setting");
            internal_error()
        }
    }
}

/// Upsert payload for settings.
#[derive(Debug, Deserialize)]
struct UpsertSettingRequest {
    value: serde_json::Value,
    description: Option<String>,
}

/// PUT `/settings/{key}` - Create or update a setting (admin).
async fn upsert_setting(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(key): Path<String>,
    Json(payload): Json<UpsertSettingRequest>,
) -> impl IntoResponse {
    if !auth.is_admin() {
        return forbidden("You need admin role to change settings");
    }

    let repo = SettingsRepository::new((*state.db).clone());
    match repo
        .upsert(&key, payload.value, payload.description.as_deref())
        .await
    {
        Ok(setting) => {
            info!(key = %key, updated_by = %auth.user_id(), "Setting upserted");
            (StatusCode::OK, Json(json!(setting))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to upsert setting");
            internal_error()
        }
    }
}

/// DELETE `/settings/{key}` - Remove a setting (admin).
async fn delete_setting(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(key): Path<String>,
) -> impl IntoResponse {
    if !auth.is_admin() {
        return forbidden("You need admin role to change settings");
    }

    let repo = SettingsRepository::new((*state.db).clone());
    match repo.delete(&key).await {
        Ok(true) => {
            info!(key = %key, deleted_by = %auth.user_id(), "Setting deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("No setting named {key}")
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to delete setting");
            internal_error()
        }
    }
}
