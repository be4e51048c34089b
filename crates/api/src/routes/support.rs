//! Route definitions for the `/support` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::support;
use crate::state::AppState;

/// Routes mounted at `/support`.
///
/// ```text
/// GET  /tickets                        -> list_tickets
/// POST /tickets                        -> create_ticket
/// GET  /tickets/{id}                   -> get_ticket
/// PUT  /tickets/{id}                   -> update_ticket
/// GET  /tickets/{id}/messages          -> list_messages
/// POST /tickets/{id}/messages          -> add_message
/// GET  /admin/tickets                  -> admin_list_tickets
/// POST /admin/tickets/{id}/assign      -> admin_assign_ticket
/// PUT  /admin/tickets/{id}/status      -> admin_set_status
/// GET  /admin/stats                    -> admin_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/tickets",
            get(support::list_tickets).post(support::create_ticket),
        )
        .route(
            "/tickets/{id}",
            get(support::get_ticket).put(support::update_ticket),
        )
        .route(
            "/tickets/{id}/messages",
            get(support::list_messages).post(support::add_message),
        )
        .route("/admin/tickets", get(support::admin_list_tickets))
        .route(
            "/admin/tickets/{id}/assign",
            post(support::admin_assign_ticket),
        )
        .route("/admin/tickets/{id}/status", put(support::admin_set_status))
        .route("/admin/stats", get(support::admin_stats))
}
