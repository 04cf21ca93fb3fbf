//! Travel agent management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser, middleware::auth::forbidden};
use triplexa_core::auth::hash_password;
use triplexa_db::entities::sea_orm_active_enums::AgentStatus;
use triplexa_db::repositories::agent::{AgentError, AgentUpdate};
use triplexa_db::{AgentRepository, SessionRepository};
use triplexa_shared::types::PageRequest;

/// Creates the agents router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/agents", get(list_agents))
        .route("/agents", post(create_agent))
        .route("/agents/{agent_id}", get(get_agent))
        .route("/agents/{agent_id}", patch(update_agent))
        .route("/agents/{agent_id}/credentials", post(set_credentials))
}

fn status_to_string(status: AgentStatus) -> &'static str {
    match status {
        AgentStatus::Pending => "pending",
        AgentStatus::Active => "active",
        AgentStatus::Suspended => "suspended",
    }
}

fn string_to_status(s: &str) -> Option<AgentStatus> {
    match s.to_lowercase().as_str() {
        "pending" => Some(AgentStatus::Pending),
        "active" => Some(AgentStatus::Active),
        "suspended" => Some(AgentStatus::Suspended),
        _ => None,
    }
}

fn agent_json(agent: &triplexa_db::entities::agents::Model) -> serde_json::Value {
    json!({
        "id": agent.id,
        "agency_name": agent.agency_name,
        "contact_name": agent.contact_name,
        "email": agent.email,
        "phone": agent.phone,
        "city": agent.city,
        "status": status_to_string(agent.status),
        "has_credentials": agent.user_id.is_some(),
        "created_at": agent.created_at,
        "updated_at": agent.updated_at
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

/// Create payload for agents.
#[derive(Debug, Deserialize)]
struct CreateAgentRequest {
    agency_name: String,
    contact_name: String,
    email: String,
    phone: Option<String>,
    city: Option<String>,
}

/// Query parameters for agent listing.
#[derive(Debug, Deserialize)]
struct ListQuery {
    status: Option<String>,
}

/// GET /agents - List agents (back office).
async fn list_agents(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to list agents");
    }

    let status = match query.status.as_deref() {
        Some(raw) => match string_to_status(raw) {
            Some(s) => Some(s),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_status",
                        "message": "Invalid status filter. Must be one of: pending, active, suspended"
                    })),
                )
                    .into_response();
            }
        },
        None => None,
    };

    let repo = AgentRepository::new((*state.db).clone());
    match repo
        .list(status, page.offset(), page.limit())
        .await
    {
        Ok((agents, total)) => {
            let data: Vec<_> = agents.iter().map(agent_json).collect();
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
            error!(error = %e, "Database error listing agents");
            internal_error()
        }
    }
}

/// POST /agents - Create an agent (back office).
async fn create_agent(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateAgentRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to create agents");
    }

    let repo = AgentRepository::new((*state.db).clone());

    // Agency emails are unique
    match repo.find_by_email(&payload.email).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "email_exists",
                    "message": "An agent with this email already exists"
                })),
            )
                .into_response();
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "Database error checking agent email");
            return internal_error();
        }
    }

    match repo
        .create(
            &payload.agency_name,
            &payload.contact_name,
            &payload.email,
            payload.phone.as_deref(),
            payload.city.as_deref(),
        )
        .await
    {
        Ok(agent) => {
            info!(agent_id = %agent.id, agency = %agent.agency_name, "Agent created");
            (StatusCode::CREATED, Json(agent_json(&agent))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create agent");
            internal_error()
        }
    }
}

/// GET `/agents/{agent_id}` - Get agent details (back office).
async fn get_agent(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(agent_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to view agents");
    }

    let repo = AgentRepository::new((*state.db).clone());
    match repo.find_by_id(agent_id).await {
        Ok(Some(agent)) => (StatusCode::OK, Json(agent_json(&agent))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Agent not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error loading agent");
            internal_error()
        }
    }
}

/// Update payload for agents.
#[derive(Debug, Deserialize)]
struct UpdateAgentRequest {
    agency_name: Option<String>,
    contact_name: Option<String>,
    phone: Option<Option<String>>,
    city: Option<Option<String>>,
    status: Option<String>,
}

/// PATCH `/agents/{agent_id}` - Update an agent (back office;
/// status changes require manager or admin).
async fn update_agent(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(agent_id): Path<uuid::Uuid>,
    Json(payload): Json<UpdateAgentRequest>,
) -> impl IntoResponse {
    if !auth.is_back_office() {
        return forbidden("You need a back-office role to update agents");
    }

    let status = match payload.status.as_deref() {
        Some(raw) => {
            if !auth.can_manage_users() {
                return forbidden("Only managers or admins can change agent status");
            }
            match string_to_status(raw) {
                Some(s) => Some(s),
                None => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({
                            "error": "invalid_status",
                            "message": "Invalid status. Must be one of: pending, active, suspended"
                        })),
                    )
                        .into_response();
                }
            }
        }
        None => None,
    };

    let update = AgentUpdate {
        agency_name: payload.agency_name,
        contact_name: payload.contact_name,
        phone: payload.phone,
        city: payload.city,
        status,
    };

    let repo = AgentRepository::new((*state.db).clone());
    match repo.update(agent_id, update).await {
        Ok(agent) => {
            // Suspension cuts off live sessions immediately
            if agent.status == AgentStatus::Suspended {
                if let Some(user_id) = agent.user_id {
                    let session_repo = SessionRepository::new((*state.db).clone());
                    if let Err(e) = session_repo.revoke_all_user_sessions(user_id).await {
                        error!(error = %e, "Failed to revoke sessions for suspended agent");
                        // Don't fail the request, the agent is already suspended
                    }
                }
            }

            info!(agent_id = %agent_id, updated_by = %auth.user_id(), "Agent updated");
            (StatusCode::OK, Json(agent_json(&agent))).into_response()
        }
        Err(sea_orm::DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Agent not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to update agent");
            internal_error()
        }
    }
}

/// Credentials payload.
#[derive(Debug, Deserialize)]
struct SetCredentialsRequest {
    password: String,
}

/// POST `/agents/{agent_id}/credentials` - Set managed credentials for an
/// agent (manager or admin). Creates the auth user, provisions the agent
/// profile, and activates the account.
async fn set_credentials(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(agent_id): Path<uuid::Uuid>,
    Json(payload): Json<SetCredentialsRequest>,
) -> impl IntoResponse {
    if !auth.can_manage_users() {
        return forbidden("You need manager or admin role to set agent credentials");
    }

    if payload.password.len() < 8 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "weak_password",
                "message": "Password must be at least 8 characters"
            })),
        )
            .into_response();
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return internal_error();
        }
    };

    let repo = AgentRepository::new((*state.db).clone());
    match repo.set_credentials(agent_id, &password_hash).await {
        Ok(agent) => {
            info!(
                agent_id = %agent_id,
                set_by = %auth.user_id(),
                "Agent credentials set"
            );
            (StatusCode::OK, Json(agent_json(&agent))).into_response()
        }
        Err(AgentError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Agent not found"
            })),
        )
            .into_response(),
        Err(AgentError::AlreadyLinked) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "already_linked",
                "message": "This agent already has credentials"
            })),
        )
            .into_response(),
        Err(AgentError::InvalidEmail) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_email",
                "message": "The agency email cannot be used for login"
            })),
        )
            .into_response(),
        Err(AgentError::Db(e)) => {
            error!(error = %e, "Failed to set agent credentials");
            internal_error()
        }
    }
}
