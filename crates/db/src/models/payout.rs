//! Payout request model and DTOs.

use serde::Serialize;
use singleaudio_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PayoutRequest {
    pub id: DbId,
    pub user_id: DbId,
    pub amount: f64,
    pub currency: String,
    pub method: String,
    pub payment_details: serde_json::Value,
    pub status: String,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub processed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a payout request (after balance checks).
#[derive(Debug)]
pub struct CreatePayout {
    pub user_id: DbId,
    pub amount: f64,
    pub currency: String,
    pub method: String,
    pub payment_details: serde_json::Value,
}
