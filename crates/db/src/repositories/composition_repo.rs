//! Repository for the `compositions` table.

use singleaudio_core::types::DbId;
use sqlx::PgPool;

use crate::models::composition::{Composition, CreateComposition, UpdateComposition};

const COLUMNS: &str = "id, publishing_identity_id, title, iswc, writers, created_at";

pub struct CompositionRepo;

impl CompositionRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateComposition,
    ) -> Result<Composition, sqlx::Error> {
        let query = format!(
            "INSERT INTO compositions (publishing_identity_id, title, iswc, writers)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Composition>(&query)
            .bind(input.publishing_identity_id)
            .bind(&input.title)
            .bind(&input.iswc)
            .bind(&input.writers)
            .fetch_one(pool)
            .await
    }

    /// Find a composition only if its identity belongs to the given user.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Composition>, sqlx::Error> {
        let query = format!(
            "SELECT c.{} FROM compositions c
             JOIN publishing_identities i ON i.id = c.publishing_identity_id
             WHERE c.id = $1 AND i.user_id = $2",
            COLUMNS.replace(", ", ", c.")
        );
        sqlx::query_as::<_, Composition>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List compositions across all of a user's publishing identities.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Composition>, sqlx::Error> {
        let query = format!(
            "SELECT c.{} FROM compositions c
             JOIN publishing_identities i ON i.id = c.publishing_identity_id
             WHERE i.user_id = $1
             ORDER BY c.created_at DESC",
            COLUMNS.replace(", ", ", c.")
        );
        sqlx::query_as::<_, Composition>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a composition. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateComposition,
    ) -> Result<Option<Composition>, sqlx::Error> {
        let query = format!(
            "UPDATE compositions SET
                title = COALESCE($2, title),
                iswc = COALESCE($3, iswc),
                writers = COALESCE($4, writers)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Composition>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.iswc)
            .bind(&input.writers)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM compositions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
