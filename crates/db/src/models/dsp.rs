//! DSP platform status model.

use serde::Serialize;
use singleaudio_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DspStatus {
    pub id: DbId,
    pub name: String,
    pub status: String,
    pub last_check: Timestamp,
    pub error_message: Option<String>,
}

/// Per-DSP delivery counts derived from distribution rows.
#[derive(Debug, Default, Serialize)]
pub struct DspDeliveryCounts {
    pub total: i64,
    pub successful: i64,
    pub failed: i64,
    pub pending: i64,
}
