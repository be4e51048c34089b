//! Repository for the `content_id_claims` table.

use singleaudio_core::types::DbId;
use sqlx::PgPool;

use crate::models::claim::{
    ClaimFilters, ClaimWithChannel, ContentIdClaim, CreateClaim, UpdateClaim,
};

const COLUMNS: &str =
    "id, channel_id, video_id, claim_id, asset_id, status, policy, created_at";

pub struct ClaimRepo;

impl ClaimRepo {
    /// Register a claim in `active` status.
    pub async fn create(pool: &PgPool, input: &CreateClaim) -> Result<ContentIdClaim, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_id_claims (channel_id, video_id, claim_id, asset_id, policy)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentIdClaim>(&query)
            .bind(input.channel_id)
            .bind(&input.video_id)
            .bind(&input.claim_id)
            .bind(&input.asset_id)
            .bind(&input.policy)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContentIdClaim>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_id_claims WHERE id = $1");
        sqlx::query_as::<_, ContentIdClaim>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a claim only if its channel belongs to the given user.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<ContentIdClaim>, sqlx::Error> {
        let query = format!(
            "SELECT c.{} FROM content_id_claims c
             JOIN youtube_channels ch ON ch.id = c.channel_id
             WHERE c.id = $1 AND ch.user_id = $2",
            COLUMNS.replace(", ", ", c.")
        );
        sqlx::query_as::<_, ContentIdClaim>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List claims across all of a user's channels with channel names.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ClaimWithChannel>, sqlx::Error> {
        let query = format!(
            "SELECT c.{}, ch.channel_name
             FROM content_id_claims c
             JOIN youtube_channels ch ON ch.id = c.channel_id
             WHERE ch.user_id = $1
             ORDER BY c.created_at DESC",
            COLUMNS.replace(", ", ", c.")
        );
        sqlx::query_as::<_, ClaimWithChannel>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List all claims with optional filters (admin).
    pub async fn list_all(
        pool: &PgPool,
        filters: &ClaimFilters,
    ) -> Result<Vec<ClaimWithChannel>, sqlx::Error> {
        let query = format!(
            "SELECT c.{}, ch.channel_name
             FROM content_id_claims c
             JOIN youtube_channels ch ON ch.id = c.channel_id
             WHERE ($1::text IS NULL OR c.status = $1)
               AND ($2::text IS NULL OR c.policy = $2)
             ORDER BY c.created_at DESC",
            COLUMNS.replace(", ", ", c.")
        );
        sqlx::query_as::<_, ClaimWithChannel>(&query)
            .bind(&filters.status)
            .bind(&filters.policy)
            .fetch_all(pool)
            .await
    }

    /// Update a claim's status and/or policy.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClaim,
    ) -> Result<Option<ContentIdClaim>, sqlx::Error> {
        let query = format!(
            "UPDATE content_id_claims SET
                status = COALESCE($2, status),
                policy = COALESCE($3, policy)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentIdClaim>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(&input.policy)
            .fetch_optional(pool)
            .await
    }
}
