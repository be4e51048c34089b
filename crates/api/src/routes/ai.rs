//! Route definitions for the `/ai` helper endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::ai;
use crate::state::AppState;

/// Routes mounted at `/ai`. All require auth.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-metadata", post(ai::generate_metadata))
        .route("/generate-cover-prompt", post(ai::generate_cover_prompt))
        .route("/forecast-revenue", post(ai::forecast_revenue))
        .route("/suggest-upload-time", post(ai::suggest_upload_time))
}
