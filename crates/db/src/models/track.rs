//! Music track entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use singleaudio_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MusicTrack {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: Option<f64>,
    pub file_url: String,
    pub cover_art_url: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a track after its files have been stored.
#[derive(Debug)]
pub struct CreateTrack {
    pub user_id: DbId,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: Option<f64>,
    pub file_url: String,
    pub cover_art_url: Option<String>,
}

/// DTO for updating track metadata. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTrack {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: Option<f64>,
    pub status: Option<String>,
}
