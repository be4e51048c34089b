//! Repository for the `user_profiles` table.

use singleaudio_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{UpdateProfile, UserProfile};

const COLUMNS: &str = "id, user_id, full_name, avatar_url, phone, bio, created_at, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    /// Fetch the profile for a user, if one has been created.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_profiles WHERE user_id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or update the user's profile. Only non-`None` fields overwrite
    /// existing values.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<UserProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_profiles (user_id, full_name, avatar_url, phone, bio)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (user_id) DO UPDATE SET
                full_name = COALESCE($2, user_profiles.full_name),
                avatar_url = COALESCE($3, user_profiles.avatar_url),
                phone = COALESCE($4, user_profiles.phone),
                bio = COALESCE($5, user_profiles.bio),
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(&input.full_name)
            .bind(&input.avatar_url)
            .bind(&input.phone)
            .bind(&input.bio)
            .fetch_one(pool)
            .await
    }
}
