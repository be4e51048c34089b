//! Repository for the `access_requests` table.

use singleaudio_core::status::account;
use singleaudio_core::types::DbId;
use sqlx::PgPool;

use crate::models::access_request::{AccessRequest, CreateAccessRequest};

const COLUMNS: &str = "id, email, full_name, reason, status, reviewed_by, reviewed_at, created_at";

pub struct AccessRequestRepo;

impl AccessRequestRepo {
    /// Insert a new pending access request.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAccessRequest,
    ) -> Result<AccessRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO access_requests (email, full_name, reason)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccessRequest>(&query)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(&input.reason)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AccessRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM access_requests WHERE id = $1");
        sqlx::query_as::<_, AccessRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Check for an existing pending request with this email.
    pub async fn find_pending_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<AccessRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM access_requests
             WHERE LOWER(email) = LOWER($1) AND status = $2"
        );
        sqlx::query_as::<_, AccessRequest>(&query)
            .bind(email)
            .bind(account::PENDING)
            .fetch_optional(pool)
            .await
    }

    /// List requests, optionally filtered by status, newest first.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<AccessRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM access_requests
             WHERE ($1::text IS NULL OR status = $1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, AccessRequest>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Mark a pending request approved or rejected, stamping the reviewer.
    ///
    /// The `status = 'pending'` guard makes review idempotence explicit:
    /// returns `None` when the request does not exist or was already decided.
    pub async fn review(
        pool: &PgPool,
        id: DbId,
        new_status: &str,
        reviewer: DbId,
    ) -> Result<Option<AccessRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE access_requests SET
                status = $2,
                reviewed_by = $3,
                reviewed_at = NOW()
             WHERE id = $1 AND status = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccessRequest>(&query)
            .bind(id)
            .bind(new_status)
            .bind(reviewer)
            .bind(account::PENDING)
            .fetch_optional(pool)
            .await
    }
}
