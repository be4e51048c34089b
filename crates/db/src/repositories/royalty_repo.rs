//! Repository for the `royalties` table.

use singleaudio_core::earnings::RoyaltyEntry;
use singleaudio_core::types::DbId;
use sqlx::{PgPool, Row};

use crate::models::royalty::{CreateRoyalty, Royalty, RoyaltyFilters, RoyaltyWithTrack};

const COLUMNS: &str =
    "id, track_id, user_id, dsp, amount, currency, period_start, period_end, created_at";

pub struct RoyaltyRepo;

impl RoyaltyRepo {
    /// Record a royalty entry (admin only).
    pub async fn create(pool: &PgPool, input: &CreateRoyalty) -> Result<Royalty, sqlx::Error> {
        let query = format!(
            "INSERT INTO royalties
                (track_id, user_id, dsp, amount, currency, period_start, period_end)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Royalty>(&query)
            .bind(input.track_id)
            .bind(input.user_id)
            .bind(&input.dsp)
            .bind(input.amount)
            .bind(&input.currency)
            .bind(input.period_start)
            .bind(input.period_end)
            .fetch_one(pool)
            .await
    }

    /// List a user's royalties with track display fields, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<RoyaltyWithTrack>, sqlx::Error> {
        let query = format!(
            "SELECT r.{}, t.title AS track_title, t.artist AS track_artist
             FROM royalties r
             JOIN music_tracks t ON t.id = r.track_id
             WHERE r.user_id = $1
             ORDER BY r.created_at DESC",
            COLUMNS.replace(", ", ", r.")
        );
        sqlx::query_as::<_, RoyaltyWithTrack>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List royalties for a single track, restricted to its owner.
    pub async fn list_by_track_for_user(
        pool: &PgPool,
        track_id: DbId,
        user_id: DbId,
    ) -> Result<Vec<Royalty>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM royalties
             WHERE track_id = $1 AND user_id = $2
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Royalty>(&query)
            .bind(track_id)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Bare (amount, dsp, created_at) entries for a user, for summaries.
    pub async fn entries_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<RoyaltyEntry>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT amount, dsp, created_at FROM royalties WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(RoyaltyEntry {
                    amount: row.try_get("amount")?,
                    dsp: row.try_get("dsp")?,
                    created_at: row.try_get("created_at")?,
                })
            })
            .collect()
    }

    /// Lifetime royalty total for a user.
    pub async fn total_for_user(pool: &PgPool, user_id: DbId) -> Result<f64, sqlx::Error> {
        let row = sqlx::query(
            "SELECT COALESCE(SUM(amount), 0)::double precision AS total
             FROM royalties WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        row.try_get("total")
    }

    /// List all royalties with optional filters (admin).
    pub async fn list_all(
        pool: &PgPool,
        filters: &RoyaltyFilters,
    ) -> Result<Vec<RoyaltyWithTrack>, sqlx::Error> {
        let query = format!(
            "SELECT r.{}, t.title AS track_title, t.artist AS track_artist
             FROM royalties r
             JOIN music_tracks t ON t.id = r.track_id
             WHERE ($1::uuid IS NULL OR r.user_id = $1)
               AND ($2::text IS NULL OR r.dsp = $2)
               AND ($3::date IS NULL OR r.period_start >= $3)
               AND ($4::date IS NULL OR r.period_end <= $4)
             ORDER BY r.created_at DESC",
            COLUMNS.replace(", ", ", r.")
        );
        sqlx::query_as::<_, RoyaltyWithTrack>(&query)
            .bind(filters.user_id)
            .bind(&filters.dsp)
            .bind(filters.start_date)
            .bind(filters.end_date)
            .fetch_all(pool)
            .await
    }
}
