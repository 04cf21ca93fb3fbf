//! Profile routes, including the get-or-create contract for the caller.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser, middleware::auth::forbidden};
use triplexa_core::provisioning::{ProvisioningService, SignupMetadata};
use triplexa_db::entities::sea_orm_active_enums::UserRole;
use triplexa_db::repositories::profile::ProfileUpdate;
use triplexa_db::{ProfileRepository, UserRepository};
use triplexa_shared::types::PageRequest;

/// Creates the profiles router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profiles/me", get(get_my_profile))
        .route("/profiles/me/role", get(get_my_role))
        .route("/profiles", get(list_profiles))
        .route("/profiles/{profile_id}", get(get_profile))
        .route("/profiles/{profile_id}", patch(update_profile))
}

/// Converts a role enum to its wire string.
pub fn role_to_string(role: UserRole) -> &'static str {
    match role {
        UserRole::Admin => "admin",
        UserRole::Manager => "manager",
        UserRole::Staff => "staff",
        UserRole::Agent => "agent",
    }
}

/// Parses a wire string to the role enum.
pub fn string_to_role(s: &str) -> Option<UserRole> {
    match s.to_lowercase().as_str() {
        "admin" => Some(UserRole::Admin),
        "manager" => Some(UserRole::Manager),
        "staff" => Some(UserRole::Staff),
        "agent" => Some(UserRole::Agent),
        _ => None,
    }
}

fn profile_json(profile: &triplexa_db::entities::profiles::Model) -> serde_json::Value {
    json!({
        "id": profile.id,
        "user_id": profile.user_id,
        "name": profile.name,
        "phone": profile.phone,
        "company_name": profile.company_name,
        "role": role_to_string(profile.role),
        "department": profile.department,
        "position": profile.position,
        "created_at": profile.created_at,
        "updated_at": profile.updated_at
    })
}

/// GET /profiles/me - Return the caller's profile, creating it if absent.
///
/// Idempotent: calling twice yields the same row without error.
async fn get_my_profile(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let profile_repo = ProfileRepository::new((*state.db).clone());
    let user_repo = UserRepository::new((*state.db).clone());

    match profile_repo.find_by_user(auth.user_id()).await {
        Ok(Some(profile)) => (StatusCode::OK, Json(profile_json(&profile))).into_response(),
        Ok(None) => {
            // Provision on demand from the auth user's email
            let user = match user_repo.find_by_id(auth.user_id()).await {
                Ok(Some(u)) => u,
                Ok(None) => {
                    return (
                        StatusCode::NOT_FOUND,
                        Json(json!({
                            "error": "not_found",
                            "message": "Authenticated user no longer exists"
                        })),
                    )
                        .into_response();
                }
                Err(e) => {
                    error!(error = %e, "Database error loading user");
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({
                            "error": "internal_error",
                            "message": "An error occurred"
                        })),
                    )
                        .into_response();
                }
            };

            let seed = match ProvisioningService::seed_from_signup(
                &user.email,
                &SignupMetadata::default(),
            ) {
                Ok(s) => s,
                Err(e) => {
                    error!(error = %e, user_id = %user.id, "Cannot derive profile seed");
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({
                            "error": "internal_error",
                            "message": "An error occurred"
                        })),
                    )
                        .into_response();
                }
            };

            match profile_repo.upsert_for_user(user.id, &seed).await {
                Ok(profile) => {
                    info!(user_id = %user.id, "Profile provisioned on demand");
                    (StatusCode::OK, Json(profile_json(&profile))).into_response()
                }
                Err(e) => {
                    error!(error = %e, user_id = %user.id, "Failed to provision profile");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({
                            "error": "internal_error",
                            "message": "An error occurred"
                        })),
                    )
                        .into_response()
                }
            }
        }
        Err(e) => {
            error!(error = %e, "Database error loading profile");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}

/// GET /profiles/me/role - Return the caller's current role.
async fn get_my_role(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let profile_repo = ProfileRepository::new((*state.db).clone());

    match profile_repo.get_role(auth.user_id()).await {
        Ok(Some(role)) => {
            (StatusCode::OK, Json(json!({ "role": role_to_string(role) }))).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "No profile exists for this user"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error loading role");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}

/// Query parameters for profile listing.
#[derive(Debug, Deserialize)]
struct ListQuery {
    /// Filter by role.
    role: Option<String>,
}

/// GET /profiles - List profiles (manager or admin).
async fn list_profiles(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    if !auth.can_manage_users() {
        return forbidden("You need manager or admin role to list profiles");
    }

    let role = match query.role.as_deref() {
        Some(raw) => match string_to_role(raw) {
            Some(r) => Some(r),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_role",
                        "message": "Invalid role filter. Must be one of: admin, manager, staff, agent"
                    })),
                )
                    .into_response();
            }
        },
        None => None,
    };

    let profile_repo = ProfileRepository::new((*state.db).clone());
    match profile_repo
        .list(role, page.offset(), page.limit())
        .await
    {
        Ok((profiles, total)) => {
            let data: Vec<_> = profiles.iter().map(profile_json).collect();
            (
                StatusCode::OK,
                Json(json!({
                    "data": data,
                    "meta": {
                        "page": page.page,
                        "per_page": page.per_page,
                        "total": total
                    }
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Database error listing profiles");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}

/// GET `/profiles/{profile_id}` - Get a profile (manager or admin).
async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(profile_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    if !auth.can_manage_users() {
        return forbidden("You need manager or admin role to view profiles");
    }

    let profile_repo = ProfileRepository::new((*state.db).clone());
    match profile_repo.find_by_id(profile_id).await {
        Ok(Some(profile)) => (StatusCode::OK, Json(profile_json(&profile))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Profile not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error loading profile");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}

/// Update payload for profiles.
#[derive(Debug, Deserialize)]
struct UpdateProfileRequest {
    name: Option<String>,
    phone: Option<Option<String>>,
    company_name: Option<Option<String>>,
    role: Option<String>,
    department: Option<Option<String>>,
    position: Option<Option<String>>,
}

/// PATCH `/profiles/{profile_id}` - Update a profile (manager or admin;
/// role changes require admin).
#[allow(clippy::too_many_lines)]
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(profile_id): Path<uuid::Uuid>,
    Json(payload): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    if !auth.can_manage_users() {
        return forbidden("You need manager or admin role to update profiles");
    }

    let role = match payload.role.as_deref() {
        Some(raw) => {
            if !auth.is_admin() {
                return forbidden("Only admins can change roles");
            }
            match string_to_role(raw) {
                Some(r) => Some(r),
                None => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({
                            "error": "invalid_role",
                            "message": "Invalid role. Must be one of: admin, manager, staff, agent"
                        })),
                    )
                        .into_response();
                }
            }
        }
        None => None,
    };

    let update = ProfileUpdate {
        name: payload.name,
        phone: payload.phone,
        company_name: payload.company_name,
        role,
        department: payload.department,
        position: payload.position,
    };

    if update.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "empty_update",
                "message": "No fields provided for update"
            })),
        )
            .into_response();
    }

    let profile_repo = ProfileRepository::new((*state.db).clone());
    match profile_repo.update(profile_id, update).await {
        Ok(profile) => {
            info!(profile_id = %profile_id, updated_by = %auth.user_id(), "Profile updated");
            (StatusCode::OK, Json(profile_json(&profile))).into_response()
        }
        Err(sea_orm::DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Profile not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to update profile");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred updating the profile"
                })),
            )
                .into_response()
        }
    }
}
