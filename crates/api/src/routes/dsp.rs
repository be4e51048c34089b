//! Route definitions for the `/dsp` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::dsp;
use crate::state::AppState;

/// Routes mounted at `/dsp`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(dsp::status))
        .route("/available", get(dsp::available))
        .route("/stats", get(dsp::stats))
        .route("/admin/all", get(dsp::admin_list))
        .route("/admin/create", post(dsp::admin_create))
        .route("/admin/{id}/status", put(dsp::admin_update_status))
        .route("/admin/initialize", post(dsp::admin_initialize))
}
