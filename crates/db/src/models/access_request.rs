//! Pre-account access request model.

use serde::Serialize;
use singleaudio_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AccessRequest {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub reason: String,
    pub status: String,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for submitting a new access request.
#[derive(Debug)]
pub struct CreateAccessRequest {
    pub email: String,
    pub full_name: String,
    pub reason: String,
}
