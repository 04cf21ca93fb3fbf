//! Authentication routes for login, registration, and token refresh.
//!
//! Registration and both login paths provision the caller's profile
//! through the one canonical seed-and-upsert path, so a missing profile
//! row is repaired wherever it is first noticed.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use chrono::{Duration, Utc};
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use triplexa_core::auth::{hash_password, verify_password};
use triplexa_core::provisioning::{ProvisioningError, ProvisioningService, SignupMetadata};
use triplexa_db::entities::sea_orm_active_enums::AgentStatus;
use triplexa_db::{AgentRepository, ProfileRepository, SessionRepository, UserRepository};
use triplexa_shared::auth::{
    AgentLoginRequest, LoginRequest, LoginResponse, LogoutRequest, RefreshRequest,
    RegisterRequest, UserInfo,
};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/agent-login", post(agent_login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
}

fn internal_error(context: &str) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": format!("An error occurred during {context}")
        })),
    )
        .into_response()
}

fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "invalid_credentials",
            "message": "Invalid email or password"
        })),
    )
        .into_response()
}

/// POST /auth/register - Register a new user and provision their profile.
#[allow(clippy::too_many_lines)]
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());
    let profile_repo = ProfileRepository::new((*state.db).clone());

    // Check if email already exists
    match user_repo.email_exists(&payload.email).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "email_exists",
                    "message": "An account with this email already exists"
                })),
            )
                .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking email");
            return internal_error("registration");
        }
    }

    // Derive the profile seed before touching the database
    let metadata = SignupMetadata {
        name: payload.name.clone(),
        phone: payload.phone.clone(),
        company_name: payload.company_name.clone(),
        role: payload.role.clone(),
        department: payload.department.clone(),
        position: payload.position.clone(),
    };
    let seed = match ProvisioningService::seed_from_signup(&payload.email, &metadata) {
        Ok(s) => s,
        Err(ProvisioningError::InvalidEmail(email)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_email",
                    "message": format!("Not a usable email address: {email}")
                })),
            )
                .into_response();
        }
        Err(ProvisioningError::UnknownRole(role)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_role",
                    "message": format!("Unknown role: {role}. Must be one of: admin, manager, staff, agent")
                })),
            )
                .into_response();
        }
    };

    // Hash password
    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return internal_error("registration");
        }
    };

    // Create user
    let user = match user_repo.create(&payload.email, &password_hash).await {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "Failed to create user");
            return internal_error("registration");
        }
    };

    // Provision the profile
    let profile = match profile_repo.upsert_for_user(user.id, &seed).await {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, user_id = %user.id, "Failed to provision profile");
            return internal_error("registration");
        }
    };

    info!(user_id = %user.id, role = %seed.role, "User registered");

    (
        StatusCode::CREATED,
        Json(json!({
            "id": user.id,
            "email": user.email,
            "profile": {
                "id": profile.id,
                "name": profile.name,
                "role": profile.role,
                "phone": profile.phone,
                "company_name": profile.company_name,
                "department": profile.department,
                "position": profile.position
            },
            "created_at": user.created_at
        })),
    )
        .into_response()
}

/// POST /auth/login - Authenticate a user and return tokens.
#[allow(clippy::too_many_lines)]
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());
    let profile_repo = ProfileRepository::new((*state.db).clone());
    let session_repo = SessionRepository::new((*state.db).clone());

    // Find user by email
    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(email = %payload.email, "Login attempt for non-existent user");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error("login");
        }
    };

    // Check if user is active
    if !user.is_active {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "account_disabled",
                "message": "This account has been disabled"
            })),
        )
            .into_response();
    }

    // Verify password
    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error("login");
        }
    }

    // Load the profile, provisioning it if somehow absent
    let profile = match profile_repo.find_by_user(user.id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            let seed = match ProvisioningService::seed_from_signup(
                &user.email,
                &SignupMetadata::default(),
            ) {
                Ok(s) => s,
                Err(e) => {
                    error!(error = %e, user_id = %user.id, "Cannot derive profile seed");
                    return internal_error("login");
                }
            };
            match profile_repo.upsert_for_user(user.id, &seed).await {
                Ok(p) => p,
                Err(e) => {
                    error!(error = %e, user_id = %user.id, "Failed to provision profile");
                    return internal_error("login");
                }
            }
        }
        Err(e) => {
            error!(error = %e, "Database error loading profile");
            return internal_error("login");
        }
    };

    issue_tokens(&state, &session_repo, user.id, &user.email, &profile).await
}

/// POST /auth/agent-login - Authenticate a managed agent by agency email.
async fn agent_login(
    State(state): State<AppState>,
    Json(payload): Json<AgentLoginRequest>,
) -> impl IntoResponse {
    let agent_repo = AgentRepository::new((*state.db).clone());
    let profile_repo = ProfileRepository::new((*state.db).clone());
    let session_repo = SessionRepository::new((*state.db).clone());

    let (agent, user) = match agent_repo.find_with_user_by_email(&payload.email).await {
        Ok(Some(pair)) => pair,
        Ok(None) => {
            info!(email = %payload.email, "Agent login for unknown agency email");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during agent login");
            return internal_error("login");
        }
    };

    // Only active agents with credentials may log in
    if agent.status != AgentStatus::Active {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "agent_not_active",
                "message": "This agency account is not active"
            })),
        )
            .into_response();
    }
    let Some(user) = user else {
        return invalid_credentials();
    };
    if !user.is_active {
        return invalid_credentials();
    }

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(agent_id = %agent.id, "Failed agent login - invalid password");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error("login");
        }
    }

    let profile = match profile_repo.find_by_user(user.id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            error!(agent_id = %agent.id, "Agent user has no profile");
            return internal_error("login");
        }
        Err(e) => {
            error!(error = %e, "Database error loading profile");
            return internal_error("login");
        }
    };

    info!(agent_id = %agent.id, user_id = %user.id, "Agent logged in");

    issue_tokens(&state, &session_repo, user.id, &user.email, &profile).await
}

/// Issues a token pair, persists the session, and builds the response.
async fn issue_tokens(
    state: &AppState,
    session_repo: &SessionRepository,
    user_id: uuid::Uuid,
    email: &str,
    profile: &triplexa_db::entities::profiles::Model,
) -> axum::response::Response {
    let role = crate::routes::profiles::role_to_string(profile.role).to_string();

    let access_token = match state.jwt_service.generate_access_token(user_id, &role) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error("login");
        }
    };

    let refresh_token = match state.jwt_service.generate_refresh_token(user_id, &role) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate refresh token");
            return internal_error("login");
        }
    };

    let expires_at = Utc::now() + Duration::days(state.jwt_service.refresh_token_expires_days());
    if let Err(e) = session_repo
        .create(user_id, &refresh_token, expires_at, None, None)
        .await
    {
        error!(error = %e, "Failed to persist session");
        return internal_error("login");
    }

    info!(user_id = %user_id, "User logged in successfully");

    let response = LoginResponse {
        user: UserInfo {
            id: user_id,
            email: email.to_string(),
            name: profile.name.clone(),
            role,
        },
        access_token,
        refresh_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// POST /auth/refresh - Rotate a refresh token.
#[allow(clippy::too_many_lines)]
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> impl IntoResponse {
    let session_repo = SessionRepository::new((*state.db).clone());
    let user_repo = UserRepository::new((*state.db).clone());
    let profile_repo = ProfileRepository::new((*state.db).clone());

    let session = match session_repo.find_by_token(&payload.refresh_token).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_token",
                    "message": "Refresh token is invalid or revoked"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error during refresh");
            return internal_error("refresh");
        }
    };

    if session.expires_at < Utc::now() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "token_expired",
                "message": "Refresh token has expired"
            })),
        )
            .into_response();
    }

    let user = match user_repo.find_by_id(session.user_id).await {
        Ok(Some(u)) if u.is_active => u,
        Ok(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "account_disabled",
                    "message": "This account has been disabled"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error during refresh");
            return internal_error("refresh");
        }
    };

    let profile = match profile_repo.find_by_user(user.id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            error!(user_id = %user.id, "User has no profile during refresh");
            return internal_error("refresh");
        }
        Err(e) => {
            error!(error = %e, "Database error loading profile");
            return internal_error("refresh");
        }
    };

    // Rotate: revoke the old session before issuing a new pair
    if let Err(e) = session_repo.revoke(session.id).await {
        error!(error = %e, "Failed to revoke session during rotation");
        return internal_error("refresh");
    }

    issue_tokens(&state, &session_repo, user.id, &user.email, &profile).await
}

/// POST /auth/logout - Revoke a refresh token.
async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<LogoutRequest>,
) -> impl IntoResponse {
    let session_repo = SessionRepository::new((*state.db).clone());

    match session_repo.revoke_by_token(&payload.refresh_token).await {
        Ok(true) => {
            info!("Session revoked");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "invalid_token",
                "message": "Refresh token is invalid or already revoked"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error during logout");
            internal_error("logout")
        }
    }
}
