//! Route definitions for the `/publishing` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::publishing;
use crate::state::AppState;

/// Routes mounted at `/publishing`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/identities",
            get(publishing::list_identities).post(publishing::create_identity),
        )
        .route(
            "/identities/{id}",
            get(publishing::get_identity).put(publishing::update_identity),
        )
        .route(
            "/compositions",
            get(publishing::list_compositions).post(publishing::create_composition),
        )
        .route(
            "/compositions/{id}",
            put(publishing::update_composition).delete(publishing::delete_composition),
        )
        .route("/stats", get(publishing::stats))
        .route("/admin/identities", get(publishing::admin_list_identities))
        .route(
            "/admin/identities/{id}/approve",
            post(publishing::admin_approve_identity),
        )
        .route(
            "/admin/identities/{id}/reject",
            post(publishing::admin_reject_identity),
        )
}
