//! Composition model and DTOs.

use serde::{Deserialize, Serialize};
use singleaudio_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Composition {
    pub id: DbId,
    pub publishing_identity_id: DbId,
    pub title: String,
    pub iswc: Option<String>,
    /// Writer name to share percentage.
    pub writers: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for registering a composition.
#[derive(Debug)]
pub struct CreateComposition {
    pub publishing_identity_id: DbId,
    pub title: String,
    pub iswc: Option<String>,
    pub writers: serde_json::Value,
}

/// DTO for updating a composition. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateComposition {
    pub title: Option<String>,
    pub iswc: Option<String>,
    pub writers: Option<serde_json::Value>,
}
