//! Route definitions for the `/admin` resource. All routes require the
//! admin role.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET  /dashboard                      -> dashboard
/// GET  /stats                          -> stats
/// GET  /recent-activity                -> recent_activity
/// GET  /analytics                      -> analytics (?days=)
/// GET  /users                          -> list_users (?status=&role=)
/// GET  /users/{id}                     -> get_user
/// PUT  /users/{id}                     -> update_user
/// DELETE /users/{id}                   -> delete_user
/// POST /users/{id}/assign-role         -> assign_role
/// GET  /access-requests                -> list_access_requests (?status=)
/// POST /access-requests/{id}/approve   -> approve_access_request
/// POST /access-requests/{id}/reject    -> reject_access_request
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/stats", get(admin::stats))
        .route("/recent-activity", get(admin::recent_activity))
        .route("/analytics", get(admin::analytics))
        .route("/users", get(admin::list_users))
        .route(
            "/users/{id}",
            get(admin::get_user)
                .put(admin::update_user)
                .delete(admin::delete_user),
        )
        .route("/users/{id}/assign-role", post(admin::assign_role))
        .route("/access-requests", get(admin::list_access_requests))
        .route(
            "/access-requests/{id}/approve",
            post(admin::approve_access_request),
        )
        .route(
            "/access-requests/{id}/reject",
            post(admin::reject_access_request),
        )
}
