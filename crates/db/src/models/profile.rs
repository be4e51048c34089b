//! User profile model (one row per user).

use serde::{Deserialize, Serialize};
use singleaudio_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting profile fields. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
}
