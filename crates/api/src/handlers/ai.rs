//! Handlers for the `/ai` helper endpoints.
//!
//! Forecast and upload-time answers degrade to deterministic heuristics when
//! no AI key is configured; the metadata and cover-prompt helpers require one.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use singleaudio_core::forecast;
use validator::Validate;

use crate::ai::{self, AiClient};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /ai/generate-metadata`.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateMetadataRequest {
    #[validate(length(min = 10, message = "Prompt must be at least 10 characters"))]
    pub prompt: String,
}

/// Request body for `POST /ai/generate-cover-prompt`.
#[derive(Debug, Deserialize, Validate)]
pub struct CoverPromptRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub genre: Option<String>,
    pub mood: Option<String>,
}

/// Request body for `POST /ai/forecast-revenue`.
#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    pub genre: Option<String>,
    pub duration: Option<f64>,
    pub title: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/ai/generate-metadata
pub async fn generate_metadata(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Json(input): Json<GenerateMetadataRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    input.validate()?;
    let client = require_client(&state)?;

    let system = "You are a music metadata assistant. Answer with a JSON object \
                  containing title, genre, description, and a tags array. No prose.";
    let answer = client.chat(system, &input.prompt).await?;
    let metadata = ai::parse_metadata(&answer);

    Ok(Json(ApiResponse::data(json!({ "metadata": metadata }))))
}

/// POST /api/ai/generate-cover-prompt
///
/// Produces an image-generation prompt for cover art; the answer is passed
/// through as text.
pub async fn generate_cover_prompt(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Json(input): Json<CoverPromptRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    input.validate()?;
    let client = require_client(&state)?;

    let system = "You write concise, vivid prompts for album cover image generation. \
                  Answer with the prompt text only.";
    let mut user = format!("Track title: {}", input.title);
    if let Some(genre) = &input.genre {
        user.push_str(&format!("\nGenre: {genre}"));
    }
    if let Some(mood) = &input.mood {
        user.push_str(&format!("\nMood: {mood}"));
    }

    let prompt = client.chat(system, &user).await?;
    Ok(Json(ApiResponse::data(json!({ "prompt": prompt.trim() }))))
}

/// POST /api/ai/forecast-revenue
///
/// Asks the AI for an estimate when a key is configured; any failure or
/// unparseable answer falls back to the genre/duration heuristic.
pub async fn forecast_revenue(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Json(input): Json<ForecastRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    if let Some(client) = AiClient::from_config(&state.config) {
        let system = "You are a music industry revenue analyst. Answer with a JSON \
                      object containing estimated_monthly_revenue (number, USD), \
                      confidence_level (0-100), factors (string array), and \
                      best_release_time (string). No prose.";
        let user = format!(
            "Forecast monthly streaming revenue for a track. Title: {}. Genre: {}. Duration: {}s.",
            input.title.as_deref().unwrap_or("unknown"),
            input.genre.as_deref().unwrap_or("unknown"),
            input.duration.unwrap_or(0.0),
        );

        match client.chat(system, &user).await {
            Ok(answer) => {
                if let Some(forecast) = ai::parse_forecast(&answer) {
                    return Ok(Json(ApiResponse::data(json!({
                        "forecast": forecast,
                        "source": "ai",
                    }))));
                }
                tracing::warn!("Unparseable AI forecast, using heuristic");
            }
            Err(e) => {
                tracing::warn!(error = %e, "AI forecast failed, using heuristic");
            }
        }
    }

    let fallback = forecast::simple_forecast(input.genre.as_deref(), input.duration);
    Ok(Json(ApiResponse::data(json!({
        "forecast": fallback,
        "source": "heuristic",
    }))))
}

/// POST /api/ai/suggest-upload-time
///
/// Purely deterministic: next Friday at 09:00 UTC.
pub async fn suggest_upload_time(
    _auth_user: AuthUser,
) -> Json<ApiResponse<serde_json::Value>> {
    let suggestion = forecast::suggest_upload_time(Utc::now());
    Json(ApiResponse::data(json!({ "suggestion": suggestion })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn require_client(state: &AppState) -> AppResult<AiClient> {
    AiClient::from_config(&state.config).ok_or_else(|| {
        AppError::ServiceUnavailable("AI features are not configured".into())
    })
}
