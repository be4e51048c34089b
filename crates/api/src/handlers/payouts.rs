//! Handlers for the `/payouts` resource: payout requests and their
//! admin review lifecycle (pending -> approved -> processed, or rejected).

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use singleaudio_core::balance;
use singleaudio_core::error::CoreError;
use singleaudio_core::status::payout;
use singleaudio_core::types::DbId;
use singleaudio_db::models::payout::{CreatePayout, PayoutRequest};
use singleaudio_db::repositories::{PayoutRepo, RoyaltyRepo, UserRepo};
use singleaudio_events::templates;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

const SUPPORTED_CURRENCIES: &[&str] = &["USD", "EUR", "GBP"];
const SUPPORTED_METHODS: &[&str] = &["paypal", "wise", "bank"];

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /payouts/request`.
#[derive(Debug, Deserialize)]
pub struct PayoutRequestBody {
    pub amount: f64,
    pub currency: String,
    pub method: String,
    #[serde(default)]
    pub payment_details: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

/// Request body for `POST /payouts/admin/{id}/reject`.
#[derive(Debug, Deserialize)]
pub struct RejectPayoutRequest {
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// User endpoints
// ---------------------------------------------------------------------------

/// GET /api/payouts
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let payouts = PayoutRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(ApiResponse::data(json!({ "payouts": payouts }))))
}

/// POST /api/payouts/request
///
/// Validates currency, method, the $25 minimum, and the available balance
/// before inserting the pending request.
pub async fn request_payout(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<PayoutRequestBody>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    if !SUPPORTED_CURRENCIES.contains(&input.currency.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unsupported currency: {}",
            input.currency
        )));
    }
    if !SUPPORTED_METHODS.contains(&input.method.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unsupported payout method: {}",
            input.method
        )));
    }

    let total = RoyaltyRepo::total_for_user(&state.pool, auth_user.user_id).await?;
    let held = PayoutRepo::held_total_for_user(&state.pool, auth_user.user_id).await?;
    let available = balance::available_balance(total, held);
    balance::validate_payout_amount(input.amount, available)?;

    let created = PayoutRepo::create(
        &state.pool,
        &CreatePayout {
            user_id: auth_user.user_id,
            amount: input.amount,
            currency: input.currency,
            method: input.method,
            payment_details: input.payment_details,
        },
    )
    .await?;

    tracing::info!(payout_id = %created.id, user_id = %auth_user.user_id, amount = created.amount, "Payout requested");
    Ok(Json(ApiResponse::data(json!({ "payout": created }))))
}

/// GET /api/payouts/{id}
pub async fn get(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let payout = PayoutRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|p| p.user_id == auth_user.user_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "payout",
            id,
        }))?;

    Ok(Json(ApiResponse::data(json!({ "payout": payout }))))
}

// ---------------------------------------------------------------------------
// Admin endpoints
// ---------------------------------------------------------------------------

/// GET /api/payouts/admin/all?status=
pub async fn admin_list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let payouts = PayoutRepo::list_all(&state.pool, query.status.as_deref()).await?;
    Ok(Json(ApiResponse::data(json!({ "payouts": payouts }))))
}

/// POST /api/payouts/admin/{id}/approve
///
/// Only pending payouts can be approved. The requester is notified by
/// email when SMTP is configured; a failed send does not undo the approval.
pub async fn approve(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let payout = review_pending(&state, id, payout::APPROVED, admin.user_id).await?;

    if let Some(mailer) = &state.mailer {
        if let Some(user) = UserRepo::find_by_id(&state.pool, payout.user_id).await? {
            let email =
                templates::payout_approved(payout.amount, &payout.currency, &payout.method);
            if let Err(e) = mailer.send(&user.email, &email.subject, &email.html).await {
                tracing::warn!(payout_id = %id, error = %e, "Failed to send payout approval email");
            }
        }
    }

    tracing::info!(payout_id = %id, reviewer = %admin.user_id, "Payout approved");
    Ok(Json(ApiResponse::data(json!({ "payout": payout }))))
}

/// POST /api/payouts/admin/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<RejectPayoutRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let payout = review_pending(&state, id, payout::REJECTED, admin.user_id).await?;

    tracing::info!(payout_id = %id, reviewer = %admin.user_id, reason = ?input.reason, "Payout rejected");
    Ok(Json(ApiResponse::data(json!({ "payout": payout }))))
}

/// POST /api/payouts/admin/{id}/process
///
/// Moves an approved payout to processed. Pending or rejected payouts
/// cannot be processed.
pub async fn process(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    if PayoutRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "payout",
            id,
        }));
    }

    let payout = PayoutRepo::mark_processed(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Only approved payouts can be processed".into(),
            ))
        })?;

    tracing::info!(payout_id = %id, reviewer = %admin.user_id, "Payout processed");
    Ok(Json(ApiResponse::data(json!({ "payout": payout }))))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Apply a review decision to a pending payout, distinguishing a missing
/// payout (404) from one already decided (409).
async fn review_pending(
    state: &AppState,
    id: DbId,
    new_status: &str,
    reviewer: DbId,
) -> AppResult<PayoutRequest> {
    if PayoutRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "payout",
            id,
        }));
    }

    PayoutRepo::review(&state.pool, id, new_status, reviewer)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Payout request has already been reviewed".into(),
            ))
        })
}
