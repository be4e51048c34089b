//! Handlers for the `/user` resource: profile and personal dashboards.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::json;
use singleaudio_core::balance;
use singleaudio_core::earnings;
use singleaudio_core::status::{distribution, ticket};
use singleaudio_db::models::profile::UpdateProfile;
use singleaudio_db::repositories::{
    DistributionRepo, PayoutRepo, ProfileRepo, RoyaltyRepo, TicketRepo, TrackRepo,
};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/user/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let profile = ProfileRepo::find_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(ApiResponse::data(json!({ "profile": profile }))))
}

/// PUT /api/user/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let profile = ProfileRepo::upsert(&state.pool, auth_user.user_id, &input).await?;
    Ok(Json(ApiResponse::data(json!({ "profile": profile }))))
}

/// GET /api/user/dashboard
///
/// One-call overview for the user landing page: profile, track and
/// distribution counts, earnings summary, and open ticket count.
pub async fn dashboard(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let user_id = auth_user.user_id;

    let profile = ProfileRepo::find_by_user(&state.pool, user_id).await?;
    let tracks = TrackRepo::list_by_user(&state.pool, user_id).await?;
    let distributions = DistributionRepo::list_by_user(&state.pool, user_id).await?;
    let tickets = TicketRepo::list_by_user(&state.pool, user_id).await?;
    let entries = RoyaltyRepo::entries_for_user(&state.pool, user_id).await?;

    let summary = earnings::summarize(&entries, Utc::now());
    let delivered = distributions
        .iter()
        .filter(|d| d.status == distribution::DELIVERED)
        .count();
    let open_tickets = tickets
        .iter()
        .filter(|t| t.status == ticket::OPEN || t.status == ticket::IN_PROGRESS)
        .count();

    Ok(Json(ApiResponse::data(json!({
        "profile": profile,
        "tracks": { "total": tracks.len(), "recent": tracks.iter().take(5).collect::<Vec<_>>() },
        "distributions": { "total": distributions.len(), "delivered": delivered },
        "earnings": summary,
        "support": { "open_tickets": open_tickets },
    }))))
}

/// GET /api/user/earnings
pub async fn earnings(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let user_id = auth_user.user_id;

    let entries = RoyaltyRepo::entries_for_user(&state.pool, user_id).await?;
    let summary = earnings::summarize(&entries, Utc::now());
    let monthly = earnings::by_month(&entries);

    let held = PayoutRepo::held_total_for_user(&state.pool, user_id).await?;
    let available = balance::available_balance(summary.total, held);

    Ok(Json(ApiResponse::data(json!({
        "summary": summary,
        "monthly": monthly,
        "available_balance": available,
    }))))
}

/// GET /api/user/activity
///
/// Recent tracks, distributions, and tickets for the activity feed.
pub async fn activity(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let user_id = auth_user.user_id;

    let tracks = TrackRepo::list_by_user(&state.pool, user_id).await?;
    let distributions = DistributionRepo::list_by_user(&state.pool, user_id).await?;
    let tickets = TicketRepo::list_by_user(&state.pool, user_id).await?;

    Ok(Json(ApiResponse::data(json!({
        "tracks": tracks.iter().take(10).collect::<Vec<_>>(),
        "distributions": distributions.iter().take(10).collect::<Vec<_>>(),
        "tickets": tickets.iter().take(10).collect::<Vec<_>>(),
    }))))
}

/// GET /api/user/statistics
///
/// Per-status groupings across the user's tracks, distributions, and payouts.
pub async fn statistics(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let user_id = auth_user.user_id;

    let tracks = TrackRepo::list_by_user(&state.pool, user_id).await?;
    let distributions = DistributionRepo::list_by_user(&state.pool, user_id).await?;
    let payouts = PayoutRepo::list_by_user(&state.pool, user_id).await?;
    let total_royalties = RoyaltyRepo::total_for_user(&state.pool, user_id).await?;

    Ok(Json(ApiResponse::data(json!({
        "tracks_by_status": count_by(tracks.iter().map(|t| t.status.as_str())),
        "distributions_by_status": count_by(distributions.iter().map(|d| d.status.as_str())),
        "payouts_by_status": count_by(payouts.iter().map(|p| p.status.as_str())),
        "total_royalties": total_royalties,
    }))))
}

fn count_by<'a>(statuses: impl Iterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for status in statuses {
        *counts.entry(status.to_string()).or_insert(0) += 1;
    }
    counts
}
