//! Route definitions for the `/cms` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::cms;
use crate::state::AppState;

/// Routes mounted at `/cms`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/channels", get(cms::list_channels).post(cms::link_channel))
        .route(
            "/channels/{id}",
            get(cms::get_channel)
                .put(cms::update_channel)
                .delete(cms::unlink_channel),
        )
        .route("/claims", get(cms::list_claims).post(cms::create_claim))
        .route("/claims/{id}", put(cms::update_claim))
        .route("/analytics", get(cms::analytics))
        .route("/admin/claims", get(cms::admin_list_claims))
}
