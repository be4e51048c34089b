//! Ticket message model.

use serde::Serialize;
use singleaudio_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TicketMessage {
    pub id: DbId,
    pub ticket_id: DbId,
    pub user_id: DbId,
    pub message: String,
    pub is_internal: bool,
    pub created_at: Timestamp,
}

/// DTO for appending a message to a ticket.
#[derive(Debug)]
pub struct CreateTicketMessage {
    pub ticket_id: DbId,
    pub user_id: DbId,
    pub message: String,
    pub is_internal: bool,
}
