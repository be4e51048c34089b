//! Route definitions for the `/payouts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payouts;
use crate::state::AppState;

/// Routes mounted at `/payouts`.
///
/// ```text
/// GET  /                       -> list
/// POST /request                -> request_payout
/// GET  /{id}                   -> get
/// GET  /admin/all              -> admin_list (?status=)
/// POST /admin/{id}/approve     -> approve
/// POST /admin/{id}/reject      -> reject
/// POST /admin/{id}/process     -> process
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(payouts::list))
        .route("/request", post(payouts::request_payout))
        .route("/admin/all", get(payouts::admin_list))
        .route("/admin/{id}/approve", post(payouts::approve))
        .route("/admin/{id}/reject", post(payouts::reject))
        .route("/admin/{id}/process", post(payouts::process))
        .route("/{id}", get(payouts::get))
}
