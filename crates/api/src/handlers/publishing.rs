//! Handlers for the `/publishing` resource: publishing identities and
//! their registered compositions.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use singleaudio_core::error::CoreError;
use singleaudio_core::status::identity;
use singleaudio_core::types::DbId;
use singleaudio_db::models::composition::{CreateComposition, UpdateComposition};
use singleaudio_db::models::identity::{CreateIdentity, UpdateIdentity};
use singleaudio_db::repositories::{CompositionRepo, IdentityRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /publishing/identities`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateIdentityRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub ipi_number: Option<String>,
    pub isni_number: Option<String>,
}

/// Request body for `POST /publishing/compositions`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompositionRequest {
    pub publishing_identity_id: DbId,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub iswc: Option<String>,
    #[serde(default)]
    pub writers: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Identities
// ---------------------------------------------------------------------------

/// GET /api/publishing/identities
pub async fn list_identities(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let identities = IdentityRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(ApiResponse::data(json!({ "identities": identities }))))
}

/// POST /api/publishing/identities
pub async fn create_identity(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateIdentityRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    input.validate()?;

    let created = IdentityRepo::create(
        &state.pool,
        &CreateIdentity {
            user_id: auth_user.user_id,
            name: input.name,
            ipi_number: input.ipi_number,
            isni_number: input.isni_number,
        },
    )
    .await?;

    tracing::info!(identity_id = %created.id, user_id = %auth_user.user_id, "Publishing identity registered");
    Ok(Json(ApiResponse::data(json!({ "identity": created }))))
}

/// GET /api/publishing/identities/{id}
pub async fn get_identity(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let identity = IdentityRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "publishing identity",
            id,
        }))?;

    Ok(Json(ApiResponse::data(json!({ "identity": identity }))))
}

/// PUT /api/publishing/identities/{id}
pub async fn update_identity(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIdentity>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    IdentityRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "publishing identity",
            id,
        }))?;

    let identity = IdentityRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "publishing identity",
            id,
        }))?;

    Ok(Json(ApiResponse::data(json!({ "identity": identity }))))
}

// ---------------------------------------------------------------------------
// Compositions
// ---------------------------------------------------------------------------

/// GET /api/publishing/compositions
pub async fn list_compositions(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let compositions = CompositionRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(ApiResponse::data(
        json!({ "compositions": compositions }),
    )))
}

/// POST /api/publishing/compositions
///
/// The target identity must belong to the caller.
pub async fn create_composition(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateCompositionRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    input.validate()?;

    IdentityRepo::find_for_user(&state.pool, input.publishing_identity_id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "publishing identity",
            id: input.publishing_identity_id,
        }))?;

    let created = CompositionRepo::create(
        &state.pool,
        &CreateComposition {
            publishing_identity_id: input.publishing_identity_id,
            title: input.title,
            iswc: input.iswc,
            writers: input.writers,
        },
    )
    .await?;

    tracing::info!(composition_id = %created.id, "Composition registered");
    Ok(Json(ApiResponse::data(json!({ "composition": created }))))
}

/// PUT /api/publishing/compositions/{id}
pub async fn update_composition(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateComposition>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    CompositionRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "composition",
            id,
        }))?;

    let composition = CompositionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "composition",
            id,
        }))?;

    Ok(Json(ApiResponse::data(json!({ "composition": composition }))))
}

/// DELETE /api/publishing/compositions/{id}
pub async fn delete_composition(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    CompositionRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "composition",
            id,
        }))?;

    CompositionRepo::delete(&state.pool, id).await?;
    Ok(Json(ApiResponse::message("Composition deleted")))
}

/// GET /api/publishing/stats
pub async fn stats(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let identities = IdentityRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    let compositions = CompositionRepo::list_by_user(&state.pool, auth_user.user_id).await?;

    let approved = identities
        .iter()
        .filter(|i| i.status == identity::APPROVED)
        .count();
    let pending = identities
        .iter()
        .filter(|i| i.status == identity::PENDING)
        .count();

    Ok(Json(ApiResponse::data(json!({
        "identities": {
            "total": identities.len(),
            "approved": approved,
            "pending": pending,
        },
        "compositions": { "total": compositions.len() },
    }))))
}

// ---------------------------------------------------------------------------
// Admin endpoints
// ---------------------------------------------------------------------------

/// GET /api/publishing/admin/identities?status=
pub async fn admin_list_identities(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let identities = IdentityRepo::list_all(&state.pool, query.status.as_deref()).await?;
    Ok(Json(ApiResponse::data(json!({ "identities": identities }))))
}

/// POST /api/publishing/admin/identities/{id}/approve
pub async fn admin_approve_identity(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    set_identity_status(&state, id, identity::APPROVED, admin.user_id).await
}

/// POST /api/publishing/admin/identities/{id}/reject
pub async fn admin_reject_identity(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    set_identity_status(&state, id, identity::REJECTED, admin.user_id).await
}

async fn set_identity_status(
    state: &AppState,
    id: DbId,
    status: &str,
    reviewer: DbId,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let identity = IdentityRepo::set_status(&state.pool, id, status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "publishing identity",
            id,
        }))?;

    tracing::info!(identity_id = %id, status, reviewer = %reviewer, "Publishing identity reviewed");
    Ok(Json(ApiResponse::data(json!({ "identity": identity }))))
}
