//! YouTube channel model and DTOs.

use serde::{Deserialize, Serialize};
use singleaudio_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A linked YouTube channel with its OAuth token pair.
///
/// Tokens are returned only to the owning user; listings for admins go
/// through the claims side and never expose these rows.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct YouTubeChannel {
    pub id: DbId,
    pub user_id: DbId,
    pub channel_id: String,
    pub channel_name: String,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: Timestamp,
    pub status: String,
    pub created_at: Timestamp,
}

/// DTO for linking a channel.
#[derive(Debug)]
pub struct CreateChannel {
    pub user_id: DbId,
    pub channel_id: String,
    pub channel_name: String,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: Timestamp,
}

/// DTO for updating a channel. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateChannel {
    pub channel_name: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_at: Option<Timestamp>,
    pub status: Option<String>,
}
