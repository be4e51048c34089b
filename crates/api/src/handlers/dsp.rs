//! Handlers for the `/dsp` resource: delivery platform status and stats.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use singleaudio_core::error::CoreError;
use singleaudio_core::status::{dsp, DEFAULT_DSPS};
use singleaudio_core::types::DbId;
use singleaudio_db::repositories::DspRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

const DSP_STATUSES: &[&str] = &[dsp::ACTIVE, dsp::MAINTENANCE, dsp::DISABLED];

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /dsp/admin/create` (admin).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDspRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub status: Option<String>,
}

/// Request body for `PUT /dsp/admin/{id}/status` (admin).
#[derive(Debug, Deserialize)]
pub struct UpdateDspStatusRequest {
    pub status: String,
    pub error_message: Option<String>,
}

// ---------------------------------------------------------------------------
// User endpoints
// ---------------------------------------------------------------------------

/// GET /api/dsp/status
pub async fn status(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let dsps = DspRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::data(json!({ "dsps": dsps }))))
}

/// GET /api/dsp/available
///
/// Only active platforms, for the distribution target picker.
pub async fn available(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let dsps = DspRepo::list(&state.pool).await?;
    let active: Vec<_> = dsps.into_iter().filter(|d| d.status == dsp::ACTIVE).collect();
    Ok(Json(ApiResponse::data(json!({ "dsps": active }))))
}

/// GET /api/dsp/stats
pub async fn stats(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let counts = DspRepo::delivery_counts(&state.pool).await?;
    Ok(Json(ApiResponse::data(json!({ "deliveries": counts }))))
}

// ---------------------------------------------------------------------------
// Admin endpoints
// ---------------------------------------------------------------------------

/// GET /api/dsp/admin/all
pub async fn admin_list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let dsps = DspRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::data(json!({ "dsps": dsps }))))
}

/// POST /api/dsp/admin/create
pub async fn admin_create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateDspRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    input.validate()?;

    let status = input.status.unwrap_or_else(|| dsp::ACTIVE.to_string());
    if !DSP_STATUSES.contains(&status.as_str()) {
        return Err(AppError::BadRequest(format!("Unknown DSP status: {status}")));
    }

    let created = DspRepo::create(&state.pool, &input.name, &status).await?;
    tracing::info!(dsp_id = %created.id, name = %created.name, "DSP registered");
    Ok(Json(ApiResponse::data(json!({ "dsp": created }))))
}

/// PUT /api/dsp/admin/{id}/status
pub async fn admin_update_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDspStatusRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    if !DSP_STATUSES.contains(&input.status.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unknown DSP status: {}",
            input.status
        )));
    }

    let updated =
        DspRepo::update_status(&state.pool, id, &input.status, input.error_message.as_deref())
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: "dsp", id }))?;

    Ok(Json(ApiResponse::data(json!({ "dsp": updated }))))
}

/// POST /api/dsp/admin/initialize
///
/// Seed the default platform list. Idempotent: existing names are left
/// untouched and only newly inserted rows are counted.
pub async fn admin_initialize(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let mut seeded = 0;
    for name in DEFAULT_DSPS {
        if DspRepo::create_if_absent(&state.pool, name, dsp::ACTIVE).await? {
            seeded += 1;
        }
    }

    tracing::info!(seeded, "DSP list initialized");
    Ok(Json(ApiResponse::with_message(
        json!({ "seeded": seeded }),
        "DSP list initialized",
    )))
}
