//! Support ticket model and DTOs.

use serde::{Deserialize, Serialize};
use singleaudio_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SupportTicket {
    pub id: DbId,
    pub user_id: DbId,
    pub subject: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub assigned_to: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for opening a ticket.
#[derive(Debug)]
pub struct CreateTicket {
    pub user_id: DbId,
    pub subject: String,
    pub description: String,
    pub priority: String,
}

/// DTO for owner-side ticket updates. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTicket {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

/// Optional filters for the admin ticket listing.
#[derive(Debug, Default)]
pub struct TicketFilters {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<DbId>,
}

/// Aggregate ticket counts for the admin stats endpoint.
#[derive(Debug, Serialize, FromRow)]
pub struct TicketStats {
    pub total: i64,
    pub open: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub low: i64,
    pub medium: i64,
    pub high: i64,
    pub urgent: i64,
}
