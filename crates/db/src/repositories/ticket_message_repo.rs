//! Repository for the `ticket_messages` table.

use singleaudio_core::types::DbId;
use sqlx::PgPool;

use crate::models::ticket_message::{CreateTicketMessage, TicketMessage};

const COLUMNS: &str = "id, ticket_id, user_id, message, is_internal, created_at";

pub struct TicketMessageRepo;

impl TicketMessageRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateTicketMessage,
    ) -> Result<TicketMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO ticket_messages (ticket_id, user_id, message, is_internal)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TicketMessage>(&query)
            .bind(input.ticket_id)
            .bind(input.user_id)
            .bind(&input.message)
            .bind(input.is_internal)
            .fetch_one(pool)
            .await
    }

    /// List a ticket's messages oldest first. Internal notes are excluded
    /// unless the caller is staff.
    pub async fn list_by_ticket(
        pool: &PgPool,
        ticket_id: DbId,
        include_internal: bool,
    ) -> Result<Vec<TicketMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ticket_messages
             WHERE ticket_id = $1 AND ($2 OR NOT is_internal)
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, TicketMessage>(&query)
            .bind(ticket_id)
            .bind(include_internal)
            .fetch_all(pool)
            .await
    }
}
