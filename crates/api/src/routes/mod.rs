pub mod admin;
pub mod ai;
pub mod auth;
pub mod cms;
pub mod dsp;
pub mod health;
pub mod music;
pub mod payouts;
pub mod publishing;
pub mod royalties;
pub mod support;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                              login (public)
/// /auth/admin/login                        admin login (public)
/// /auth/request-access                     submit access request (public)
/// /auth/verify-token                       verify a token (public)
/// /auth/request-password-reset             password reset request (public)
/// /auth/change-password                    change password (requires auth)
/// /auth/logout                             logout (requires auth)
/// /auth/me                                 current user + profile
///
/// /user/profile                            get, update profile
/// /user/dashboard                          landing page overview
/// /user/earnings                           earnings summary + balance
/// /user/activity                           recent activity feed
/// /user/statistics                         per-status groupings
///
/// /admin/dashboard                         platform-wide stats
/// /admin/stats                             service stats (uptime, version)
/// /admin/recent-activity                   recent platform activity
/// /admin/analytics                         revenue charts (?days=)
/// /admin/users                             list (?status=&role=)
/// /admin/users/{id}                        get, update, delete
/// /admin/users/{id}/assign-role            assign role (POST)
/// /admin/access-requests                   list (?status=)
/// /admin/access-requests/{id}/approve      approve + create account (POST)
/// /admin/access-requests/{id}/reject       reject (POST)
///
/// /music/tracks                            list, upload (multipart)
/// /music/tracks/{id}                       get, update, delete (owner only)
/// /music/distribute                        request distribution (POST)
/// /music/distributions                     list own distributions
/// /music/distributions/{id}                get (owner only)
/// /music/distributions/{id}/status         update status (PUT, owner only)
/// /music/admin/tracks                      list all (?status=&user_id=)
/// /music/admin/distributions               list all (?status=)
/// /music/files/audio/{filename}            serve audio (GET)
/// /music/files/covers/{filename}           serve cover art (GET)
///
/// /royalties                               list own royalties
/// /royalties/summary                       earnings summary
/// /royalties/balance                       available balance
/// /royalties/track/{id}                    per-track royalties (owner only)
/// /royalties/admin/create                  record royalty (POST, admin)
/// /royalties/admin/all                     list all (?user_id=&dsp=&...)
///
/// /payouts                                 list own payout requests
/// /payouts/request                         request payout (POST)
/// /payouts/{id}                            get (owner only)
/// /payouts/admin/all                       list all (?status=)
/// /payouts/admin/{id}/approve              approve (POST)
/// /payouts/admin/{id}/reject               reject (POST)
/// /payouts/admin/{id}/process              mark processed (POST)
///
/// /publishing/identities                   list, register
/// /publishing/identities/{id}              get, update (owner only)
/// /publishing/compositions                 list, register
/// /publishing/compositions/{id}            update, delete (owner only)
/// /publishing/stats                        identity/composition counts
/// /publishing/admin/identities             list all (?status=)
/// /publishing/admin/identities/{id}/approve   approve (POST)
/// /publishing/admin/identities/{id}/reject    reject (POST)
///
/// /support/tickets                         list, open
/// /support/tickets/{id}                    get, update (owner or admin)
/// /support/tickets/{id}/messages           list, add
/// /support/admin/tickets                   list all (?status=&priority=&assigned_to=)
/// /support/admin/tickets/{id}/assign       assign to admin (POST)
/// /support/admin/tickets/{id}/status       set status (PUT)
/// /support/admin/stats                     ticket aggregates
///
/// /cms/channels                            list, link
/// /cms/channels/{id}                       get, update, unlink (owner only)
/// /cms/claims                              list, register
/// /cms/claims/{id}                         update (owner only)
/// /cms/analytics                           claim groupings
/// /cms/admin/claims                        list all (?status=&policy=)
///
/// /ai/generate-metadata                    track metadata helper (POST)
/// /ai/generate-cover-prompt                cover art prompt helper (POST)
/// /ai/forecast-revenue                     revenue forecast (POST)
/// /ai/suggest-upload-time                  release timing suggestion (POST)
///
/// /dsp/status                              all platform statuses
/// /dsp/available                           active platforms only
/// /dsp/stats                               per-DSP delivery counts
/// /dsp/admin/all                           list all (admin)
/// /dsp/admin/create                        register platform (POST, admin)
/// /dsp/admin/{id}/status                   set status (PUT, admin)
/// /dsp/admin/initialize                    seed defaults (POST, admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication and access requests.
        .nest("/auth", auth::router())
        // User profile and personal dashboards.
        .nest("/user", user::router())
        // Platform administration.
        .nest("/admin", admin::router())
        // Track catalog, distributions, and stored files.
        .nest("/music", music::router())
        // Royalty ledger.
        .nest("/royalties", royalties::router())
        // Payout requests and their review lifecycle.
        .nest("/payouts", payouts::router())
        // Publishing identities and compositions.
        .nest("/publishing", publishing::router())
        // Support tickets and message threads.
        .nest("/support", support::router())
        // YouTube channels and Content ID claims.
        .nest("/cms", cms::router())
        // AI helpers with deterministic fallbacks.
        .nest("/ai", ai::router())
        // Delivery platform status.
        .nest("/dsp", dsp::router())
}
