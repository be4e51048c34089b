//! Route definitions for the `/user` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`. All require auth.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(user::get_profile).put(user::update_profile))
        .route("/dashboard", get(user::dashboard))
        .route("/earnings", get(user::earnings))
        .route("/activity", get(user::activity))
        .route("/statistics", get(user::statistics))
}
