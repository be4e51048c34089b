//! Route definitions for the `/royalties` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::royalties;
use crate::state::AppState;

/// Routes mounted at `/royalties`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(royalties::list))
        .route("/summary", get(royalties::summary))
        .route("/balance", get(royalties::get_balance))
        .route("/track/{id}", get(royalties::list_by_track))
        .route("/admin/create", post(royalties::admin_create))
        .route("/admin/all", get(royalties::admin_list))
}
