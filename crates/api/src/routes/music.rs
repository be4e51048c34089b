//! Route definitions for the `/music` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::music;
use crate::state::AppState;

/// Routes mounted at `/music`.
///
/// ```text
/// GET  /tracks                      -> list_tracks
/// POST /tracks                      -> create_track (multipart)
/// GET  /tracks/{id}                 -> get_track
/// PUT  /tracks/{id}                 -> update_track
/// DELETE /tracks/{id}               -> delete_track
/// POST /distribute                  -> distribute
/// GET  /distributions               -> list_distributions
/// GET  /distributions/{id}          -> get_distribution
/// PUT  /distributions/{id}/status   -> update_distribution_status
/// GET  /admin/tracks                -> admin_list_tracks
/// GET  /admin/distributions         -> admin_list_distributions
/// GET  /files/audio/{filename}      -> serve_audio
/// GET  /files/covers/{filename}     -> serve_cover
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tracks", get(music::list_tracks).post(music::create_track))
        .route(
            "/tracks/{id}",
            get(music::get_track)
                .put(music::update_track)
                .delete(music::delete_track),
        )
        .route("/distribute", post(music::distribute))
        .route("/distributions", get(music::list_distributions))
        .route("/distributions/{id}", get(music::get_distribution))
        .route(
            "/distributions/{id}/status",
            put(music::update_distribution_status),
        )
        .route("/admin/tracks", get(music::admin_list_tracks))
        .route("/admin/distributions", get(music::admin_list_distributions))
        .route("/files/audio/{filename}", get(music::serve_audio))
        .route("/files/covers/{filename}", get(music::serve_cover))
}
