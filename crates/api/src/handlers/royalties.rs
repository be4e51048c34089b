//! Handlers for the `/royalties` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use singleaudio_core::balance;
use singleaudio_core::earnings;
use singleaudio_core::error::CoreError;
use singleaudio_core::types::DbId;
use singleaudio_db::models::royalty::{CreateRoyalty, RoyaltyFilters};
use singleaudio_db::repositories::{PayoutRepo, RoyaltyRepo, TrackRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AdminRoyaltyQuery {
    pub user_id: Option<DbId>,
    pub dsp: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// GET /api/royalties
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let royalties = RoyaltyRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(ApiResponse::data(json!({ "royalties": royalties }))))
}

/// GET /api/royalties/summary
pub async fn summary(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let entries = RoyaltyRepo::entries_for_user(&state.pool, auth_user.user_id).await?;
    let summary = earnings::summarize(&entries, Utc::now());
    let monthly = earnings::by_month(&entries);

    Ok(Json(ApiResponse::data(json!({
        "summary": summary,
        "monthly": monthly,
    }))))
}

/// GET /api/royalties/balance
///
/// Available balance = total royalties minus payouts that hold funds
/// (approved or processed), floored at zero.
pub async fn get_balance(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let total = RoyaltyRepo::total_for_user(&state.pool, auth_user.user_id).await?;
    let held = PayoutRepo::held_total_for_user(&state.pool, auth_user.user_id).await?;
    let available = balance::available_balance(total, held);

    Ok(Json(ApiResponse::data(json!({
        "total_royalties": total,
        "held_payouts": held,
        "available_balance": available,
    }))))
}

/// GET /api/royalties/track/{id}
///
/// Royalties for one track, restricted to its owner.
pub async fn list_by_track(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(track_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let owned = TrackRepo::find_by_id(&state.pool, track_id)
        .await?
        .is_some_and(|t| t.user_id == auth_user.user_id);
    if !owned {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "track",
            id: track_id,
        }));
    }

    let royalties =
        RoyaltyRepo::list_by_track_for_user(&state.pool, track_id, auth_user.user_id).await?;
    Ok(Json(ApiResponse::data(json!({ "royalties": royalties }))))
}

/// POST /api/royalties/admin/create (admin)
pub async fn admin_create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateRoyalty>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    if input.amount <= 0.0 {
        return Err(AppError::BadRequest("Amount must be positive".into()));
    }
    if input.period_end < input.period_start {
        return Err(AppError::BadRequest(
            "period_end must not precede period_start".into(),
        ));
    }

    let royalty = RoyaltyRepo::create(&state.pool, &input).await?;
    tracing::info!(royalty_id = %royalty.id, user_id = %input.user_id, "Royalty recorded");
    Ok(Json(ApiResponse::data(json!({ "royalty": royalty }))))
}

/// GET /api/royalties/admin/all (admin)
pub async fn admin_list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<AdminRoyaltyQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let filters = RoyaltyFilters {
        user_id: query.user_id,
        dsp: query.dsp,
        start_date: query.start_date,
        end_date: query.end_date,
    };
    let royalties = RoyaltyRepo::list_all(&state.pool, &filters).await?;
    Ok(Json(ApiResponse::data(json!({ "royalties": royalties }))))
}
