//! Handlers for the `/music` resource: track uploads, distribution requests,
//! and stored-file serving.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use singleaudio_core::error::CoreError;
use singleaudio_core::status::{distribution, track};
use singleaudio_core::types::DbId;
use singleaudio_core::upload::FileKind;
use singleaudio_db::models::distribution::CreateDistribution;
use singleaudio_db::models::track::{CreateTrack, UpdateTrack};
use singleaudio_db::repositories::{DistributionRepo, TrackRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::storage::FileStore;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AdminTrackQuery {
    pub status: Option<String>,
    pub user_id: Option<DbId>,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

/// Request body for `POST /music/distribute`.
#[derive(Debug, Deserialize)]
pub struct DistributeRequest {
    pub track_id: DbId,
    pub dsps: Vec<String>,
}

/// Request body for `PUT /music/distributions/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateDistributionStatus {
    pub status: String,
    pub error_message: Option<String>,
}

/// Metadata fields accepted alongside the files in the upload form.
#[derive(Debug, Default)]
struct UploadForm {
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    genre: Option<String>,
    release_date: Option<chrono::NaiveDate>,
    duration: Option<f64>,
    audio: Option<(String, Vec<u8>)>,
    cover_art: Option<(String, Vec<u8>)>,
}

// ---------------------------------------------------------------------------
// Tracks
// ---------------------------------------------------------------------------

/// GET /api/music/tracks
pub async fn list_tracks(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let tracks = TrackRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(ApiResponse::data(json!({ "tracks": tracks }))))
}

/// POST /api/music/tracks (multipart)
///
/// Required parts: `title`, `artist`, and an `audio` file. Optional:
/// `album`, `genre`, `release_date`, `duration`, and a `cover_art` file.
/// Files are stored under generated uuid names; the returned track carries
/// the serving URLs.
pub async fn create_track(
    State(state): State<AppState>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audio" | "cover_art" => {
                let filename = field
                    .file_name()
                    .ok_or_else(|| AppError::BadRequest(format!("{name} must be a file part")))?
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read {name}: {e}")))?;
                if bytes.len() > state.config.max_upload_bytes {
                    return Err(AppError::BadRequest(format!(
                        "{name} exceeds the maximum upload size"
                    )));
                }
                let part = (filename, bytes.to_vec());
                if name == "audio" {
                    form.audio = Some(part);
                } else {
                    form.cover_art = Some(part);
                }
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read {name}: {e}")))?;
                match name.as_str() {
                    "title" => form.title = Some(value),
                    "artist" => form.artist = Some(value),
                    "album" => form.album = Some(value),
                    "genre" => form.genre = Some(value),
                    "release_date" => {
                        let date = value.parse().map_err(|_| {
                            AppError::BadRequest("release_date must be YYYY-MM-DD".into())
                        })?;
                        form.release_date = Some(date);
                    }
                    "duration" => {
                        let secs: f64 = value.parse().map_err(|_| {
                            AppError::BadRequest("duration must be a number of seconds".into())
                        })?;
                        form.duration = Some(secs);
                    }
                    // Unknown parts are ignored.
                    _ => {}
                }
            }
        }
    }

    let title = form
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("title is required".into()))?;
    let artist = form
        .artist
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("artist is required".into()))?;
    let (audio_name, audio_bytes) = form
        .audio
        .ok_or_else(|| AppError::BadRequest("An audio file is required".into()))?;

    let store = FileStore::new(&state.config.upload_dir);
    let stored_audio = store.save(FileKind::Audio, &audio_name, &audio_bytes).await?;

    let cover_art_url = match form.cover_art {
        Some((cover_name, cover_bytes)) => {
            let stored = store
                .save(FileKind::CoverArt, &cover_name, &cover_bytes)
                .await?;
            Some(format!("/api/music/files/covers/{stored}"))
        }
        None => None,
    };

    let track = TrackRepo::create(
        &state.pool,
        &CreateTrack {
            user_id: auth_user.user_id,
            title,
            artist,
            album: form.album,
            genre: form.genre,
            release_date: form.release_date,
            duration: form.duration,
            file_url: format!("/api/music/files/audio/{stored_audio}"),
            cover_art_url,
        },
    )
    .await?;

    tracing::info!(track_id = %track.id, user_id = %auth_user.user_id, "Track uploaded");
    Ok(Json(ApiResponse::data(json!({ "track": track }))))
}

/// GET /api/music/tracks/{id}
///
/// Ownership-guarded: another user's track reads as not-found.
pub async fn get_track(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let track = find_owned_track(&state, id, auth_user.user_id).await?;
    Ok(Json(ApiResponse::data(json!({ "track": track }))))
}

/// PUT /api/music/tracks/{id}
pub async fn update_track(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTrack>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    if let Some(status) = &input.status {
        if !track::ALL.contains(&status.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Unknown track status: {status}"
            )));
        }
    }

    find_owned_track(&state, id, auth_user.user_id).await?;

    let track = TrackRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "track", id }))?;

    Ok(Json(ApiResponse::data(json!({ "track": track }))))
}

/// DELETE /api/music/tracks/{id}
pub async fn delete_track(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let track = find_owned_track(&state, id, auth_user.user_id).await?;

    TrackRepo::delete(&state.pool, id).await?;

    // Remove stored files after the row; orphan files are preferable to
    // dangling rows.
    let store = FileStore::new(&state.config.upload_dir);
    if let Some(filename) = track.file_url.rsplit('/').next() {
        let _ = store.delete(FileKind::Audio, filename).await;
    }
    if let Some(cover_url) = &track.cover_art_url {
        if let Some(filename) = cover_url.rsplit('/').next() {
            let _ = store.delete(FileKind::CoverArt, filename).await;
        }
    }

    tracing::info!(track_id = %id, "Track deleted");
    Ok(Json(ApiResponse::message("Track deleted")))
}

// ---------------------------------------------------------------------------
// Distributions
// ---------------------------------------------------------------------------

/// POST /api/music/distribute
pub async fn distribute(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<DistributeRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    if input.dsps.is_empty() {
        return Err(AppError::BadRequest(
            "At least one DSP must be selected".into(),
        ));
    }

    find_owned_track(&state, input.track_id, auth_user.user_id).await?;

    let distribution = DistributionRepo::create(
        &state.pool,
        &CreateDistribution {
            track_id: input.track_id,
            dsps: input.dsps,
        },
    )
    .await?;

    tracing::info!(distribution_id = %distribution.id, track_id = %input.track_id, "Distribution requested");
    Ok(Json(ApiResponse::data(
        json!({ "distribution": distribution }),
    )))
}

/// GET /api/music/distributions
pub async fn list_distributions(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let distributions = DistributionRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(ApiResponse::data(
        json!({ "distributions": distributions }),
    )))
}

/// GET /api/music/distributions/{id}
pub async fn get_distribution(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let distribution = DistributionRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "distribution",
            id,
        }))?;

    Ok(Json(ApiResponse::data(
        json!({ "distribution": distribution }),
    )))
}

/// PUT /api/music/distributions/{id}/status
///
/// Ownership-guarded like the rest of the distribution endpoints: a
/// distribution on another user's track reads as not-found.
pub async fn update_distribution_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDistributionStatus>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    if !distribution::ALL.contains(&input.status.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unknown distribution status: {}",
            input.status
        )));
    }

    DistributionRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "distribution",
            id,
        }))?;

    let updated = DistributionRepo::update_status(
        &state.pool,
        id,
        Some(&input.status),
        input.error_message.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "distribution",
        id,
    }))?;

    Ok(Json(ApiResponse::data(json!({ "distribution": updated }))))
}

// ---------------------------------------------------------------------------
// Admin listings
// ---------------------------------------------------------------------------

/// GET /api/music/admin/tracks?status=&user_id=
pub async fn admin_list_tracks(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<AdminTrackQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let tracks = TrackRepo::list_all(&state.pool, query.status.as_deref(), query.user_id).await?;
    Ok(Json(ApiResponse::data(json!({ "tracks": tracks }))))
}

/// GET /api/music/admin/distributions?status=
pub async fn admin_list_distributions(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let distributions = DistributionRepo::list_all(&state.pool, query.status.as_deref()).await?;
    Ok(Json(ApiResponse::data(
        json!({ "distributions": distributions }),
    )))
}

// ---------------------------------------------------------------------------
// File serving
// ---------------------------------------------------------------------------

/// GET /api/music/files/audio/{filename}
pub async fn serve_audio(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(filename): Path<String>,
) -> AppResult<impl IntoResponse> {
    serve_file(&state, FileKind::Audio, &filename).await
}

/// GET /api/music/files/covers/{filename}
pub async fn serve_cover(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(filename): Path<String>,
) -> AppResult<impl IntoResponse> {
    serve_file(&state, FileKind::CoverArt, &filename).await
}

async fn serve_file(
    state: &AppState,
    kind: FileKind,
    filename: &str,
) -> AppResult<impl IntoResponse> {
    let store = FileStore::new(&state.config.upload_dir);
    let (bytes, content_type) = store.read(kind, filename).await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        bytes,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a track only if the user owns it; foreign rows read as not-found.
async fn find_owned_track(
    state: &AppState,
    id: DbId,
    user_id: DbId,
) -> AppResult<singleaudio_db::models::track::MusicTrack> {
    TrackRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|track| track.user_id == user_id)
        .ok_or(AppError::Core(CoreError::NotFound { entity: "track", id }))
}
