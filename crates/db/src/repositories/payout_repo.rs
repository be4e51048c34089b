//! Repository for the `payout_requests` table.

use singleaudio_core::status::payout;
use singleaudio_core::types::DbId;
use sqlx::{PgPool, Row};

use crate::models::payout::{CreatePayout, PayoutRequest};

const COLUMNS: &str = "id, user_id, amount, currency, method, payment_details, status, \
                       reviewed_by, reviewed_at, processed_at, created_at";

pub struct PayoutRepo;

impl PayoutRepo {
    /// Insert a new payout request in `pending` status.
    pub async fn create(pool: &PgPool, input: &CreatePayout) -> Result<PayoutRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO payout_requests (user_id, amount, currency, method, payment_details)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PayoutRequest>(&query)
            .bind(input.user_id)
            .bind(input.amount)
            .bind(&input.currency)
            .bind(&input.method)
            .bind(&input.payment_details)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PayoutRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payout_requests WHERE id = $1");
        sqlx::query_as::<_, PayoutRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's payout requests, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<PayoutRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payout_requests WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, PayoutRequest>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List all payout requests, optionally filtered by status (admin).
    pub async fn list_all(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<PayoutRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payout_requests
             WHERE ($1::text IS NULL OR status = $1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, PayoutRequest>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Approve or reject a pending payout, stamping the reviewer.
    ///
    /// Returns `None` when the payout does not exist or was already decided.
    pub async fn review(
        pool: &PgPool,
        id: DbId,
        new_status: &str,
        reviewer: DbId,
    ) -> Result<Option<PayoutRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE payout_requests SET
                status = $2,
                reviewed_by = $3,
                reviewed_at = NOW()
             WHERE id = $1 AND status = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PayoutRequest>(&query)
            .bind(id)
            .bind(new_status)
            .bind(reviewer)
            .bind(payout::PENDING)
            .fetch_optional(pool)
            .await
    }

    /// Mark an approved payout as processed.
    pub async fn mark_processed(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PayoutRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE payout_requests SET
                status = $2,
                processed_at = NOW()
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PayoutRequest>(&query)
            .bind(id)
            .bind(payout::PROCESSED)
            .bind(payout::APPROVED)
            .fetch_optional(pool)
            .await
    }

    /// Sum of the user's payouts that hold back balance: approved or
    /// processed requests. Pending and rejected ones do not reduce it.
    pub async fn held_total_for_user(pool: &PgPool, user_id: DbId) -> Result<f64, sqlx::Error> {
        let row = sqlx::query(
            "SELECT COALESCE(SUM(amount), 0)::double precision AS total
             FROM payout_requests
             WHERE user_id = $1 AND status = ANY($2)",
        )
        .bind(user_id)
        .bind(&payout::BALANCE_HOLDING[..])
        .fetch_one(pool)
        .await?;
        row.try_get("total")
    }
}
