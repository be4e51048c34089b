//! Publishing identity model and DTOs.

use serde::{Deserialize, Serialize};
use singleaudio_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PublishingIdentity {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub ipi_number: Option<String>,
    pub isni_number: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
}

/// DTO for registering a publishing identity.
#[derive(Debug)]
pub struct CreateIdentity {
    pub user_id: DbId,
    pub name: String,
    pub ipi_number: Option<String>,
    pub isni_number: Option<String>,
}

/// DTO for updating an identity. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateIdentity {
    pub name: Option<String>,
    pub ipi_number: Option<String>,
    pub isni_number: Option<String>,
}
