//! Repository for the `distributions` table.

use singleaudio_core::types::DbId;
use sqlx::PgPool;

use crate::models::distribution::{CreateDistribution, Distribution};

const COLUMNS: &str =
    "id, track_id, dsps, status, delivery_date, error_message, created_at, updated_at";

pub struct DistributionRepo;

impl DistributionRepo {
    /// Insert a new distribution request in `pending` status.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDistribution,
    ) -> Result<Distribution, sqlx::Error> {
        let query = format!(
            "INSERT INTO distributions (track_id, dsps)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Distribution>(&query)
            .bind(input.track_id)
            .bind(&input.dsps)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Distribution>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM distributions WHERE id = $1");
        sqlx::query_as::<_, Distribution>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List distributions whose track belongs to the given user.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Distribution>, sqlx::Error> {
        let query = format!(
            "SELECT d.{} FROM distributions d
             JOIN music_tracks t ON t.id = d.track_id
             WHERE t.user_id = $1
             ORDER BY d.created_at DESC",
            COLUMNS.replace(", ", ", d.")
        );
        sqlx::query_as::<_, Distribution>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a distribution only if its track belongs to the given user.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Distribution>, sqlx::Error> {
        let query = format!(
            "SELECT d.{} FROM distributions d
             JOIN music_tracks t ON t.id = d.track_id
             WHERE d.id = $1 AND t.user_id = $2",
            COLUMNS.replace(", ", ", d.")
        );
        sqlx::query_as::<_, Distribution>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all distributions, optionally filtered by status (admin).
    pub async fn list_all(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<Distribution>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM distributions
             WHERE ($1::text IS NULL OR status = $1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Distribution>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Update a distribution's status and optional error message.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: Option<&str>,
        error_message: Option<&str>,
    ) -> Result<Option<Distribution>, sqlx::Error> {
        let query = format!(
            "UPDATE distributions SET
                status = COALESCE($2, status),
                error_message = COALESCE($3, error_message),
                delivery_date = CASE WHEN $2 = 'delivered' THEN NOW() ELSE delivery_date END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Distribution>(&query)
            .bind(id)
            .bind(status)
            .bind(error_message)
            .fetch_optional(pool)
            .await
    }
}
