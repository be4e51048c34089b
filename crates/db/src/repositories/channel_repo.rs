//! Repository for the `youtube_channels` table.

use singleaudio_core::types::DbId;
use sqlx::PgPool;

use crate::models::channel::{CreateChannel, UpdateChannel, YouTubeChannel};

const COLUMNS: &str = "id, user_id, channel_id, channel_name, access_token, refresh_token, \
                       expires_at, status, created_at";

pub struct ChannelRepo;

impl ChannelRepo {
    /// Link a channel in `active` status.
    pub async fn create(
        pool: &PgPool,
        input: &CreateChannel,
    ) -> Result<YouTubeChannel, sqlx::Error> {
        let query = format!(
            "INSERT INTO youtube_channels
                (user_id, channel_id, channel_name, access_token, refresh_token, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, YouTubeChannel>(&query)
            .bind(input.user_id)
            .bind(&input.channel_id)
            .bind(&input.channel_name)
            .bind(&input.access_token)
            .bind(&input.refresh_token)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<YouTubeChannel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM youtube_channels WHERE id = $1");
        sqlx::query_as::<_, YouTubeChannel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a channel only if it belongs to the given user.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<YouTubeChannel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM youtube_channels WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, YouTubeChannel>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<YouTubeChannel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM youtube_channels WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, YouTubeChannel>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a channel. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateChannel,
    ) -> Result<Option<YouTubeChannel>, sqlx::Error> {
        let query = format!(
            "UPDATE youtube_channels SET
                channel_name = COALESCE($2, channel_name),
                access_token = COALESCE($3, access_token),
                refresh_token = COALESCE($4, refresh_token),
                expires_at = COALESCE($5, expires_at),
                status = COALESCE($6, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, YouTubeChannel>(&query)
            .bind(id)
            .bind(&input.channel_name)
            .bind(&input.access_token)
            .bind(&input.refresh_token)
            .bind(input.expires_at)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Unlink a channel. Its claims cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM youtube_channels WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
