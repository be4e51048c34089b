//! Handlers for the `/cms` resource: linked YouTube channels and their
//! Content ID claims.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use singleaudio_core::error::CoreError;
use singleaudio_core::status::claim;
use singleaudio_core::types::{DbId, Timestamp};
use singleaudio_db::models::channel::{CreateChannel, UpdateChannel};
use singleaudio_db::models::claim::{ClaimFilters, CreateClaim, UpdateClaim};
use singleaudio_db::repositories::{ChannelRepo, ClaimRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /cms/channels`.
#[derive(Debug, Deserialize, Validate)]
pub struct LinkChannelRequest {
    #[validate(length(min = 1, message = "Channel id is required"))]
    pub channel_id: String,
    #[validate(length(min = 1, message = "Channel name is required"))]
    pub channel_name: String,
    #[validate(length(min = 1, message = "Access token is required"))]
    pub access_token: String,
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
    pub expires_at: Timestamp,
}

/// Request body for `POST /cms/claims`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClaimRequest {
    pub channel_id: DbId,
    #[validate(length(min = 1, message = "Video id is required"))]
    pub video_id: String,
    #[validate(length(min = 1, message = "Claim id is required"))]
    pub claim_id: String,
    #[validate(length(min = 1, message = "Asset id is required"))]
    pub asset_id: String,
    pub policy: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminClaimQuery {
    pub status: Option<String>,
    pub policy: Option<String>,
}

// ---------------------------------------------------------------------------
// Channels
// ---------------------------------------------------------------------------

/// GET /api/cms/channels
pub async fn list_channels(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let channels = ChannelRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(ApiResponse::data(json!({ "channels": channels }))))
}

/// POST /api/cms/channels
pub async fn link_channel(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<LinkChannelRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    input.validate()?;

    let channel = ChannelRepo::create(
        &state.pool,
        &CreateChannel {
            user_id: auth_user.user_id,
            channel_id: input.channel_id,
            channel_name: input.channel_name,
            access_token: input.access_token,
            refresh_token: input.refresh_token,
            expires_at: input.expires_at,
        },
    )
    .await?;

    tracing::info!(channel_id = %channel.id, user_id = %auth_user.user_id, "Channel linked");
    Ok(Json(ApiResponse::data(json!({ "channel": channel }))))
}

/// GET /api/cms/channels/{id}
pub async fn get_channel(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let channel = ChannelRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "channel",
            id,
        }))?;

    Ok(Json(ApiResponse::data(json!({ "channel": channel }))))
}

/// PUT /api/cms/channels/{id}
pub async fn update_channel(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateChannel>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    ChannelRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "channel",
            id,
        }))?;

    let channel = ChannelRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "channel",
            id,
        }))?;

    Ok(Json(ApiResponse::data(json!({ "channel": channel }))))
}

/// DELETE /api/cms/channels/{id}
///
/// Unlinks the channel. Its claims cascade away with it.
pub async fn unlink_channel(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    ChannelRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "channel",
            id,
        }))?;

    ChannelRepo::delete(&state.pool, id).await?;
    tracing::info!(channel_id = %id, "Channel unlinked");
    Ok(Json(ApiResponse::message("Channel unlinked")))
}

// ---------------------------------------------------------------------------
// Claims
// ---------------------------------------------------------------------------

/// GET /api/cms/claims
pub async fn list_claims(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let claims = ClaimRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(ApiResponse::data(json!({ "claims": claims }))))
}

/// POST /api/cms/claims
///
/// The target channel must belong to the caller.
pub async fn create_claim(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateClaimRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    input.validate()?;

    if !claim::POLICIES.contains(&input.policy.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unknown claim policy: {}",
            input.policy
        )));
    }

    ChannelRepo::find_for_user(&state.pool, input.channel_id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "channel",
            id: input.channel_id,
        }))?;

    let created = ClaimRepo::create(
        &state.pool,
        &CreateClaim {
            channel_id: input.channel_id,
            video_id: input.video_id,
            claim_id: input.claim_id,
            asset_id: input.asset_id,
            policy: input.policy,
        },
    )
    .await?;

    tracing::info!(claim_id = %created.id, "Content ID claim registered");
    Ok(Json(ApiResponse::data(json!({ "claim": created }))))
}

/// PUT /api/cms/claims/{id}
pub async fn update_claim(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateClaim>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    if let Some(policy) = &input.policy {
        if !claim::POLICIES.contains(&policy.as_str()) {
            return Err(AppError::BadRequest(format!("Unknown claim policy: {policy}")));
        }
    }
    if let Some(status) = &input.status {
        if !claim::ALL.contains(&status.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Unknown claim status: {status}"
            )));
        }
    }

    ClaimRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "claim",
            id,
        }))?;

    let updated = ClaimRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "claim",
            id,
        }))?;

    Ok(Json(ApiResponse::data(json!({ "claim": updated }))))
}

/// GET /api/cms/analytics
///
/// Per-status and per-policy groupings across the user's claims.
pub async fn analytics(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let channels = ChannelRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    let claims = ClaimRepo::list_by_user(&state.pool, auth_user.user_id).await?;

    let active = claims.iter().filter(|c| c.status == claim::ACTIVE).count();
    let disputed = claims
        .iter()
        .filter(|c| c.status == claim::DISPUTED)
        .count();
    let monetized = claims
        .iter()
        .filter(|c| c.policy == claim::POLICY_MONETIZE)
        .count();

    Ok(Json(ApiResponse::data(json!({
        "channels": { "total": channels.len() },
        "claims": {
            "total": claims.len(),
            "active": active,
            "disputed": disputed,
            "monetized": monetized,
        },
    }))))
}

// ---------------------------------------------------------------------------
// Admin endpoints
// ---------------------------------------------------------------------------

/// GET /api/cms/admin/claims?status=&policy=
pub async fn admin_list_claims(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<AdminClaimQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let filters = ClaimFilters {
        status: query.status,
        policy: query.policy,
    };
    let claims = ClaimRepo::list_all(&state.pool, &filters).await?;
    Ok(Json(ApiResponse::data(json!({ "claims": claims }))))
}
