//! Handlers for the `/admin` resource: platform dashboard, user management,
//! and access-request review. All routes require the `admin` role.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use singleaudio_core::error::CoreError;
use singleaudio_core::roles::{ROLE_ADMIN, ROLE_USER};
use singleaudio_core::status::account;
use singleaudio_core::types::DbId;
use singleaudio_db::models::profile::UpdateProfile;
use singleaudio_db::models::user::{CreateUser, UpdateUser, UserResponse};
use singleaudio_db::repositories::{
    AccessRequestRepo, DashboardRepo, PayoutRepo, ProfileRepo, TicketRepo, TrackRepo, UserRepo,
};
use validator::Validate;

use crate::auth::password::{generate_temp_password, hash_password};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub status: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    /// Window length in days (default 30).
    pub days: Option<i32>,
}

/// Request body for `POST /admin/users/{id}/assign-role`.
#[derive(Debug, Deserialize, Validate)]
pub struct AssignRoleRequest {
    #[validate(custom(function = validate_role))]
    pub role: String,
}

fn validate_role(role: &str) -> Result<(), validator::ValidationError> {
    if role == ROLE_ADMIN || role == ROLE_USER {
        Ok(())
    } else {
        Err(validator::ValidationError::new("role").with_message("Role must be admin or user".into()))
    }
}

/// Request body for `POST /admin/access-requests/{id}/reject`.
#[derive(Debug, Default, Deserialize)]
pub struct RejectAccessRequest {
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Dashboard and analytics
// ---------------------------------------------------------------------------

/// GET /api/admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let stats = DashboardRepo::stats(&state.pool).await?;
    Ok(Json(ApiResponse::data(json!({ "stats": stats }))))
}

/// GET /api/admin/stats
///
/// Dashboard blocks plus process uptime.
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let stats = DashboardRepo::stats(&state.pool).await?;
    let uptime_secs = (Utc::now() - state.started_at).num_seconds().max(0);

    Ok(Json(ApiResponse::data(json!({
        "stats": stats,
        "uptime_secs": uptime_secs,
        "version": env!("CARGO_PKG_VERSION"),
    }))))
}

/// GET /api/admin/recent-activity
pub async fn recent_activity(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let users = UserRepo::list(&state.pool, None, None).await?;
    let tracks = TrackRepo::list_all(&state.pool, None, None).await?;
    let payouts = PayoutRepo::list_all(&state.pool, None).await?;
    let tickets = TicketRepo::list_all(&state.pool, &Default::default()).await?;

    let recent_users: Vec<UserResponse> = users.iter().take(10).map(UserResponse::from).collect();

    Ok(Json(ApiResponse::data(json!({
        "users": recent_users,
        "tracks": tracks.iter().take(10).collect::<Vec<_>>(),
        "payouts": payouts.iter().take(10).collect::<Vec<_>>(),
        "tickets": tickets.iter().take(10).collect::<Vec<_>>(),
    }))))
}

/// GET /api/admin/analytics?days=30
pub async fn analytics(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let days = query.days.unwrap_or(30).clamp(1, 365);

    let daily_revenue = DashboardRepo::daily_revenue(&state.pool, days).await?;
    let revenue_by_dsp = DashboardRepo::revenue_by_dsp(&state.pool, days).await?;
    let top_tracks = DashboardRepo::top_tracks(&state.pool, days, 10).await?;

    Ok(Json(ApiResponse::data(json!({
        "days": days,
        "daily_revenue": daily_revenue,
        "revenue_by_dsp": revenue_by_dsp,
        "top_tracks": top_tracks,
    }))))
}

// ---------------------------------------------------------------------------
// User management
// ---------------------------------------------------------------------------

/// GET /api/admin/users?status=&role=
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<UserListQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let users = UserRepo::list(&state.pool, query.status.as_deref(), query.role.as_deref()).await?;
    let users: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(Json(ApiResponse::data(json!({ "users": users }))))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "user", id }))?;
    let profile = ProfileRepo::find_by_user(&state.pool, id).await?;

    Ok(Json(ApiResponse::data(json!({
        "user": UserResponse::from(&user),
        "profile": profile,
    }))))
}

/// PUT /api/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    if let Some(role) = &input.role {
        if role != ROLE_ADMIN && role != ROLE_USER {
            return Err(AppError::BadRequest(format!("Unknown role: {role}")));
        }
    }
    if let Some(status) = &input.status {
        if !account::ALL.contains(&status.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Unknown account status: {status}"
            )));
        }
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "user", id }))?;

    Ok(Json(ApiResponse::data(
        json!({ "user": UserResponse::from(&user) }),
    )))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    if admin.user_id == id {
        return Err(AppError::BadRequest(
            "Admins cannot delete their own account".into(),
        ));
    }

    let deleted = UserRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "user", id }));
    }

    tracing::info!(user_id = %id, deleted_by = %admin.user_id, "User deleted");
    Ok(Json(ApiResponse::message("User deleted")))
}

/// POST /api/admin/users/{id}/assign-role
pub async fn assign_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<AssignRoleRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    input.validate()?;

    let update = UpdateUser {
        role: Some(input.role.clone()),
        ..Default::default()
    };
    let user = UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "user", id }))?;

    tracing::info!(user_id = %id, role = %input.role, assigned_by = %admin.user_id, "Role assigned");
    Ok(Json(ApiResponse::data(
        json!({ "user": UserResponse::from(&user) }),
    )))
}

// ---------------------------------------------------------------------------
// Access requests
// ---------------------------------------------------------------------------

/// GET /api/admin/access-requests?status=
pub async fn list_access_requests(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let requests = AccessRequestRepo::list(&state.pool, query.status.as_deref()).await?;
    Ok(Json(ApiResponse::data(json!({ "requests": requests }))))
}

/// POST /api/admin/access-requests/{id}/approve
///
/// Creates an approved user account with a random temporary password, a
/// profile carrying the requester's name, stamps the reviewer on the request,
/// and emails the credentials. The user creation and the email are not
/// atomic; a failed email only logs a warning.
pub async fn approve_access_request(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let request = AccessRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "access request",
            id,
        }))?;

    if request.status != account::PENDING {
        return Err(AppError::Core(CoreError::Conflict(
            "Access request has already been reviewed".into(),
        )));
    }

    if UserRepo::find_by_email(&state.pool, &request.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    let temp_password = generate_temp_password();
    let password_hash = hash_password(&temp_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: request.email.clone(),
            password_hash,
            role: ROLE_USER.to_string(),
            status: account::APPROVED.to_string(),
        },
    )
    .await?;

    ProfileRepo::upsert(
        &state.pool,
        user.id,
        &UpdateProfile {
            full_name: Some(request.full_name.clone()),
            ..Default::default()
        },
    )
    .await?;

    let reviewed = AccessRequestRepo::review(&state.pool, id, account::APPROVED, admin.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Access request has already been reviewed".into(),
            ))
        })?;

    if let Some(mailer) = &state.mailer {
        let content = singleaudio_events::templates::access_request_approved(
            &request.full_name,
            &request.email,
            &temp_password,
            &state.config.login_url,
        );
        if let Err(e) = mailer.send(&request.email, &content.subject, &content.html).await {
            tracing::warn!(error = %e, email = %request.email, "Approval email failed");
        }
    }

    tracing::info!(request_id = %id, user_id = %user.id, "Access request approved");
    Ok(Json(ApiResponse::with_message(
        json!({ "request": reviewed, "user": UserResponse::from(&user) }),
        "Access request approved and account created",
    )))
}

/// POST /api/admin/access-requests/{id}/reject
pub async fn reject_access_request(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<RejectAccessRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let request = AccessRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "access request",
            id,
        }))?;

    let reviewed = AccessRequestRepo::review(&state.pool, id, account::REJECTED, admin.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Access request has already been reviewed".into(),
            ))
        })?;

    if let Some(mailer) = &state.mailer {
        let content = singleaudio_events::templates::access_request_rejected(
            &request.full_name,
            input.reason.as_deref(),
        );
        if let Err(e) = mailer.send(&request.email, &content.subject, &content.html).await {
            tracing::warn!(error = %e, email = %request.email, "Rejection email failed");
        }
    }

    tracing::info!(request_id = %id, "Access request rejected");
    Ok(Json(ApiResponse::with_message(
        json!({ "request": reviewed }),
        "Access request rejected",
    )))
}
