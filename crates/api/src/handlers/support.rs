//! Handlers for the `/support` resource: tickets and their message threads.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use singleaudio_core::error::CoreError;
use singleaudio_core::roles::ROLE_ADMIN;
use singleaudio_core::status::ticket;
use singleaudio_core::types::DbId;
use singleaudio_db::models::ticket::{CreateTicket, SupportTicket, TicketFilters, UpdateTicket};
use singleaudio_db::models::ticket_message::CreateTicketMessage;
use singleaudio_db::repositories::{TicketMessageRepo, TicketRepo, UserRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

const PRIORITIES: &[&str] = &["low", "medium", "high", "urgent"];
const STATUSES: &[&str] = &[
    ticket::OPEN,
    ticket::IN_PROGRESS,
    ticket::RESOLVED,
    ticket::CLOSED,
];

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /support/tickets`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTicketRequest {
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub priority: Option<String>,
}

/// Request body for `POST /support/tickets/{id}/messages`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddMessageRequest {
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    /// Internal notes are only available to admins and are hidden from the
    /// ticket owner.
    #[serde(default)]
    pub is_internal: bool,
}

#[derive(Debug, Deserialize)]
pub struct AdminTicketQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<DbId>,
}

/// Request body for `POST /support/admin/tickets/{id}/assign`.
#[derive(Debug, Deserialize)]
pub struct AssignTicketRequest {
    pub assignee_id: DbId,
}

/// Request body for `PUT /support/admin/tickets/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

// ---------------------------------------------------------------------------
// User endpoints
// ---------------------------------------------------------------------------

/// GET /api/support/tickets
pub async fn list_tickets(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let tickets = TicketRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(ApiResponse::data(json!({ "tickets": tickets }))))
}

/// POST /api/support/tickets
pub async fn create_ticket(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateTicketRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    input.validate()?;

    let priority = input.priority.unwrap_or_else(|| "medium".to_string());
    if !PRIORITIES.contains(&priority.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unknown priority: {priority}"
        )));
    }

    let created = TicketRepo::create(
        &state.pool,
        &CreateTicket {
            user_id: auth_user.user_id,
            subject: input.subject,
            description: input.description,
            priority,
        },
    )
    .await?;

    tracing::info!(ticket_id = %created.id, user_id = %auth_user.user_id, "Support ticket opened");
    Ok(Json(ApiResponse::data(json!({ "ticket": created }))))
}

/// GET /api/support/tickets/{id}
///
/// Owners and admins may view a ticket; anyone else reads not-found.
pub async fn get_ticket(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let ticket = find_visible_ticket(&state, id, &auth_user).await?;
    Ok(Json(ApiResponse::data(json!({ "ticket": ticket }))))
}

/// PUT /api/support/tickets/{id}
pub async fn update_ticket(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTicket>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    find_visible_ticket(&state, id, &auth_user).await?;

    if let Some(priority) = &input.priority {
        if !PRIORITIES.contains(&priority.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Unknown priority: {priority}"
            )));
        }
    }
    if let Some(status) = &input.status {
        if !STATUSES.contains(&status.as_str()) {
            return Err(AppError::BadRequest(format!("Unknown status: {status}")));
        }
    }

    let ticket = TicketRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ticket",
            id,
        }))?;

    Ok(Json(ApiResponse::data(json!({ "ticket": ticket }))))
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// GET /api/support/tickets/{id}/messages
///
/// Internal notes are included only for admins.
pub async fn list_messages(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    find_visible_ticket(&state, id, &auth_user).await?;

    let include_internal = auth_user.role == ROLE_ADMIN;
    let messages = TicketMessageRepo::list_by_ticket(&state.pool, id, include_internal).await?;
    Ok(Json(ApiResponse::data(json!({ "messages": messages }))))
}

/// POST /api/support/tickets/{id}/messages
pub async fn add_message(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AddMessageRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    input.validate()?;
    find_visible_ticket(&state, id, &auth_user).await?;

    if input.is_internal && auth_user.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only staff can post internal notes".into(),
        )));
    }

    let message = TicketMessageRepo::create(
        &state.pool,
        &CreateTicketMessage {
            ticket_id: id,
            user_id: auth_user.user_id,
            message: input.message,
            is_internal: input.is_internal,
        },
    )
    .await?;

    Ok(Json(ApiResponse::data(json!({ "message": message }))))
}

// ---------------------------------------------------------------------------
// Admin endpoints
// ---------------------------------------------------------------------------

/// GET /api/support/admin/tickets?status=&priority=&assigned_to=
pub async fn admin_list_tickets(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<AdminTicketQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let filters = TicketFilters {
        status: query.status,
        priority: query.priority,
        assigned_to: query.assigned_to,
    };
    let tickets = TicketRepo::list_all(&state.pool, &filters).await?;
    Ok(Json(ApiResponse::data(json!({ "tickets": tickets }))))
}

/// POST /api/support/admin/tickets/{id}/assign
///
/// The assignee must be an existing admin; the ticket moves to in_progress.
pub async fn admin_assign_ticket(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<AssignTicketRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let assignee = UserRepo::find_by_id(&state.pool, input.assignee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: input.assignee_id,
        }))?;
    if assignee.role != ROLE_ADMIN {
        return Err(AppError::BadRequest(
            "Tickets can only be assigned to admins".into(),
        ));
    }

    let ticket = TicketRepo::assign(&state.pool, id, input.assignee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ticket",
            id,
        }))?;

    tracing::info!(ticket_id = %id, assignee = %input.assignee_id, "Ticket assigned");
    Ok(Json(ApiResponse::data(json!({ "ticket": ticket }))))
}

/// PUT /api/support/admin/tickets/{id}/status
pub async fn admin_set_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    if !STATUSES.contains(&input.status.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unknown status: {}",
            input.status
        )));
    }

    let ticket = TicketRepo::set_status(&state.pool, id, &input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ticket",
            id,
        }))?;

    Ok(Json(ApiResponse::data(json!({ "ticket": ticket }))))
}

/// GET /api/support/admin/stats
pub async fn admin_stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let stats = TicketRepo::stats(&state.pool).await?;
    Ok(Json(ApiResponse::data(json!({ "stats": stats }))))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a ticket visible to the caller: its owner or any admin.
async fn find_visible_ticket(
    state: &AppState,
    id: DbId,
    auth_user: &AuthUser,
) -> AppResult<SupportTicket> {
    TicketRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|t| t.user_id == auth_user.user_id || auth_user.role == ROLE_ADMIN)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ticket",
            id,
        }))
}
