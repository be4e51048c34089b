//! Repository for the `music_tracks` table.

use singleaudio_core::types::DbId;
use sqlx::PgPool;

use crate::models::track::{CreateTrack, MusicTrack, UpdateTrack};

const COLUMNS: &str = "id, user_id, title, artist, album, genre, release_date, duration, \
                       file_url, cover_art_url, metadata, status, created_at, updated_at";

pub struct TrackRepo;

impl TrackRepo {
    /// Insert a new track in `draft` status.
    pub async fn create(pool: &PgPool, input: &CreateTrack) -> Result<MusicTrack, sqlx::Error> {
        let query = format!(
            "INSERT INTO music_tracks
                (user_id, title, artist, album, genre, release_date, duration,
                 file_url, cover_art_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MusicTrack>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.artist)
            .bind(&input.album)
            .bind(&input.genre)
            .bind(input.release_date)
            .bind(input.duration)
            .bind(&input.file_url)
            .bind(&input.cover_art_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MusicTrack>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM music_tracks WHERE id = $1");
        sqlx::query_as::<_, MusicTrack>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's tracks, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<MusicTrack>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM music_tracks WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, MusicTrack>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List all tracks, optionally filtered by status and/or owner (admin).
    pub async fn list_all(
        pool: &PgPool,
        status: Option<&str>,
        user_id: Option<DbId>,
    ) -> Result<Vec<MusicTrack>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM music_tracks
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::uuid IS NULL OR user_id = $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, MusicTrack>(&query)
            .bind(status)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update track metadata. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTrack,
    ) -> Result<Option<MusicTrack>, sqlx::Error> {
        let query = format!(
            "UPDATE music_tracks SET
                title = COALESCE($2, title),
                artist = COALESCE($3, artist),
                album = COALESCE($4, album),
                genre = COALESCE($5, genre),
                release_date = COALESCE($6, release_date),
                duration = COALESCE($7, duration),
                status = COALESCE($8, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MusicTrack>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.artist)
            .bind(&input.album)
            .bind(&input.genre)
            .bind(input.release_date)
            .bind(input.duration)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a track. Distributions and royalties cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM music_tracks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
