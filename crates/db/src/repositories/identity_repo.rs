//! Repository for the `publishing_identities` table.

use singleaudio_core::types::DbId;
use sqlx::PgPool;

use crate::models::identity::{CreateIdentity, PublishingIdentity, UpdateIdentity};

const COLUMNS: &str = "id, user_id, name, ipi_number, isni_number, status, created_at";

pub struct IdentityRepo;

impl IdentityRepo {
    /// Register a publishing identity in `pending` status.
    pub async fn create(
        pool: &PgPool,
        input: &CreateIdentity,
    ) -> Result<PublishingIdentity, sqlx::Error> {
        let query = format!(
            "INSERT INTO publishing_identities (user_id, name, ipi_number, isni_number)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PublishingIdentity>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.ipi_number)
            .bind(&input.isni_number)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PublishingIdentity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM publishing_identities WHERE id = $1");
        sqlx::query_as::<_, PublishingIdentity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an identity only if it belongs to the given user.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<PublishingIdentity>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM publishing_identities WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, PublishingIdentity>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<PublishingIdentity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM publishing_identities WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, PublishingIdentity>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List all identities, optionally filtered by status (admin).
    pub async fn list_all(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<PublishingIdentity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM publishing_identities
             WHERE ($1::text IS NULL OR status = $1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, PublishingIdentity>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Update an identity's registration fields.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateIdentity,
    ) -> Result<Option<PublishingIdentity>, sqlx::Error> {
        let query = format!(
            "UPDATE publishing_identities SET
                name = COALESCE($2, name),
                ipi_number = COALESCE($3, ipi_number),
                isni_number = COALESCE($4, isni_number)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PublishingIdentity>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.ipi_number)
            .bind(&input.isni_number)
            .fetch_optional(pool)
            .await
    }

    /// Move an identity to approved or rejected (admin review).
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<PublishingIdentity>, sqlx::Error> {
        let query = format!(
            "UPDATE publishing_identities SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PublishingIdentity>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
