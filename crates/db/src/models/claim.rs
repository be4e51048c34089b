//! Content ID claim model and DTOs.

use serde::{Deserialize, Serialize};
use singleaudio_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContentIdClaim {
    pub id: DbId,
    pub channel_id: DbId,
    pub video_id: String,
    pub claim_id: String,
    pub asset_id: String,
    pub status: String,
    pub policy: String,
    pub created_at: Timestamp,
}

/// Claim row joined with its channel's display name, for user listings.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ClaimWithChannel {
    pub id: DbId,
    pub channel_id: DbId,
    pub video_id: String,
    pub claim_id: String,
    pub asset_id: String,
    pub status: String,
    pub policy: String,
    pub created_at: Timestamp,
    pub channel_name: String,
}

/// DTO for registering a claim.
#[derive(Debug)]
pub struct CreateClaim {
    pub channel_id: DbId,
    pub video_id: String,
    pub claim_id: String,
    pub asset_id: String,
    pub policy: String,
}

/// DTO for updating a claim. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateClaim {
    pub status: Option<String>,
    pub policy: Option<String>,
}

/// Optional filters for the admin claim listing.
#[derive(Debug, Default)]
pub struct ClaimFilters {
    pub status: Option<String>,
    pub policy: Option<String>,
}
