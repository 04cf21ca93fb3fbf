//! Staff routes for payout bank accounts.

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
use triplexa_db::repositories::staff::BankAccountInput;
use triplexa_db::{ProfileRepository, StaffRepository};

/// Creates the staff router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/staff/{profile_id}/bank-account", put(upsert_bank_account))
        .route("/staff/{profile_id}/bank-account", get(get_bank_account))
        .route(
            "/staff/{profile_id}/bank-account",
            delete(delete_bank_account),
        )
}

fn account_json(account: &triplexa_db::entities::staff_bank_accounts::Model) -> serde_json::Value {
    json!({
        "id": account.id,
        "profile_id": account.profile_id,
        "account_holder": account.account_holder,
        "account_number": account.account_number,
        "ifsc_code": account.ifsc_code,
        "bank_name": account.bank_name,
        "branch": account.branch,
        "updated_at": account.updated_at
    })
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

/// Returns true if the caller owns the profile or can manage users.
async fn authorized_for_profile(
    state: &AppState,
    auth: &AuthUser,
    profile_id: uuid::Uuid,
) -> Result<bool, axum::response::Response> {
    if auth.can_manage_users() {
        return Ok(true);
    }

    let profile_repo = ProfileRepository::new((*state.db).clone());
    match profile_repo.find_by_id(profile_id).await {
        Ok(Some(profile)) => Ok(profile.user_id == auth.user_id()),
        Ok(None) => Ok(false),
        Err(e) => {
            error!(error = %e, "Database error checking profile ownership");
            Err(internal_error())
        }
    }
}

/// Upsert payload for bank accounts.
#[derive(Debug, Deserialize)]
struct UpsertBankAccountRequest {
    account_holder: String,
    account_number: String,
    ifsc_code: String,
    bank_name: String,
    branch: Option<String>,
}

/// PUT `/staff/{profile_id}/bank-account` - Create or update the payout
/// account for a profile. Idempotent on repeated submissions.
async fn upsert_bank_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(profile_id): Path<uuid::Uuid>,
    Json(payload): Json<UpsertBankAccountRequest>,
) -> impl IntoResponse {
    match authorized_for_profile(&state, &auth, profile_id).await {
        Ok(true) => {}
        Ok(false) => {
            return forbidden("You can only manage your own bank account");
        }
        Err(resp) => return resp,
    }

    if payload.account_number.trim().is_empty() || payload.ifsc_code.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "missing_fields",
                "message": "Account number and IFSC code are required"
            })),
        )
            .into_response();
    }

    let input = BankAccountInput {
        account_holder: payload.account_holder,
        account_number: payload.account_number,
        ifsc_code: payload.ifsc_code,
        bank_name: payload.bank_name,
        branch: payload.branch,
    };

    let repo = StaffRepository::new((*state.db).clone());
    match repo.upsert_bank_account(profile_id, &input).await {
        Ok(account) => {
            info!(profile_id = %profile_id, "Bank account upserted");
            (StatusCode::OK, Json(account_json(&account))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to upsert bank account");
            internal_error()
        }
    }
}

/// GET `/staff/{profile_id}/bank-account` - Fetch the payout account.
async fn get_bank_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(profile_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    match authorized_for_profile(&state, &auth, profile_id).await {
        Ok(true) => {}
        Ok(false) => {
            return forbidden("You can only view your own bank account");
        }
        Err(resp) => return resp,
    }

    let repo = StaffRepository::new((*state.db).clone());
    match repo.find_bank_account(profile_id).await {
        Ok(Some(account)) => (StatusCode::OK, Json(account_json(&account))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "No bank account on file for this profile"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error loading bank account");
            internal_error()
        }
    }
}

/// DELETE `/staff/{profile_id}/bank-account` - Remove the payout account
/// (manager or admin).
async fn delete_bank_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(profile_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    if !auth.can_manage_users() {
        return forbidden("You need manager or admin role to delete bank accounts");
    }

    let repo = StaffRepository::new((*state.db).clone());
    match repo.delete_bank_account(profile_id).await {
        Ok(true) => {
            info!(profile_id = %profile_id, deleted_by = %auth.user_id(), "Bank account deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "No bank account on file for this profile"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to delete bank account");
            internal_error()
        }
    }
}
