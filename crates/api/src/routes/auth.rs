//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login                   -> login
/// POST /admin/login             -> admin_login
/// POST /request-access          -> request_access
/// POST /verify-token            -> verify_token
/// POST /request-password-reset  -> request_password_reset
/// POST /change-password         -> change_password (requires auth)
/// POST /logout                  -> logout (requires auth)
/// GET  /me                      -> me (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/admin/login", post(auth::admin_login))
        .route("/request-access", post(auth::request_access))
        .route("/verify-token", post(auth::verify_token))
        .route("/request-password-reset", post(auth::request_password_reset))
        .route("/change-password", post(auth::change_password))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}
