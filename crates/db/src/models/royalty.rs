//! Royalty ledger entry model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use singleaudio_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Royalty {
    pub id: DbId,
    pub track_id: DbId,
    pub user_id: DbId,
    pub dsp: String,
    pub amount: f64,
    pub currency: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub created_at: Timestamp,
}

/// Royalty row joined with its track's display fields, for user listings.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RoyaltyWithTrack {
    pub id: DbId,
    pub track_id: DbId,
    pub user_id: DbId,
    pub dsp: String,
    pub amount: f64,
    pub currency: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub created_at: Timestamp,
    pub track_title: String,
    pub track_artist: String,
}

/// DTO for recording a royalty entry (admin only).
#[derive(Debug, Deserialize)]
pub struct CreateRoyalty {
    pub track_id: DbId,
    pub user_id: DbId,
    pub dsp: String,
    pub amount: f64,
    pub currency: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

/// Optional filters for the admin royalty listing.
#[derive(Debug, Default)]
pub struct RoyaltyFilters {
    pub user_id: Option<DbId>,
    pub dsp: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
