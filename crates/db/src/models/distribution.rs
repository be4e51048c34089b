//! DSP distribution request model.

use serde::Serialize;
use singleaudio_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Distribution {
    pub id: DbId,
    pub track_id: DbId,
    pub dsps: Vec<String>,
    pub status: String,
    pub delivery_date: Option<Timestamp>,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a distribution request.
#[derive(Debug)]
pub struct CreateDistribution {
    pub track_id: DbId,
    pub dsps: Vec<String>,
}
