//! Repository for the `support_tickets` table.

use singleaudio_core::status::ticket;
use singleaudio_core::types::DbId;
use sqlx::PgPool;

use crate::models::ticket::{CreateTicket, SupportTicket, TicketFilters, TicketStats, UpdateTicket};

const COLUMNS: &str =
    "id, user_id, subject, description, priority, status, assigned_to, created_at, updated_at";

pub struct TicketRepo;

impl TicketRepo {
    /// Open a new ticket in `open` status.
    pub async fn create(pool: &PgPool, input: &CreateTicket) -> Result<SupportTicket, sqlx::Error> {
        let query = format!(
            "INSERT INTO support_tickets (user_id, subject, description, priority)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(input.user_id)
            .bind(&input.subject)
            .bind(&input.description)
            .bind(&input.priority)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SupportTicket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM support_tickets WHERE id = $1");
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's tickets, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<SupportTicket>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM support_tickets WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List all tickets with optional filters (admin).
    pub async fn list_all(
        pool: &PgPool,
        filters: &TicketFilters,
    ) -> Result<Vec<SupportTicket>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM support_tickets
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::text IS NULL OR priority = $2)
               AND ($3::uuid IS NULL OR assigned_to = $3)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(&filters.status)
            .bind(&filters.priority)
            .bind(filters.assigned_to)
            .fetch_all(pool)
            .await
    }

    /// Update ticket fields. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTicket,
    ) -> Result<Option<SupportTicket>, sqlx::Error> {
        let query = format!(
            "UPDATE support_tickets SET
                subject = COALESCE($2, subject),
                description = COALESCE($3, description),
                priority = COALESCE($4, priority),
                status = COALESCE($5, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(id)
            .bind(&input.subject)
            .bind(&input.description)
            .bind(&input.priority)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Assign a ticket to a staff member, moving it to `in_progress`.
    pub async fn assign(
        pool: &PgPool,
        id: DbId,
        assignee: DbId,
    ) -> Result<Option<SupportTicket>, sqlx::Error> {
        let query = format!(
            "UPDATE support_tickets SET
                assigned_to = $2,
                status = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(id)
            .bind(assignee)
            .bind(ticket::IN_PROGRESS)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<SupportTicket>, sqlx::Error> {
        let query = format!(
            "UPDATE support_tickets SET
                status = $2,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Aggregate counts by status and priority for the admin stats endpoint.
    pub async fn stats(pool: &PgPool) -> Result<TicketStats, sqlx::Error> {
        sqlx::query_as::<_, TicketStats>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'open') AS open,
                COUNT(*) FILTER (WHERE status = 'in_progress') AS in_progress,
                COUNT(*) FILTER (WHERE status = 'resolved') AS resolved,
                COUNT(*) FILTER (WHERE priority = 'low') AS low,
                COUNT(*) FILTER (WHERE priority = 'medium') AS medium,
                COUNT(*) FILTER (WHERE priority = 'high') AS high,
                COUNT(*) FILTER (WHERE priority = 'urgent') AS urgent
             FROM support_tickets",
        )
        .fetch_one(pool)
        .await
    }
}
