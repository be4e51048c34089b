//! Repository for the `dsp_statuses` table.

use std::collections::BTreeMap;

use singleaudio_core::types::DbId;
use sqlx::{PgPool, Row};

use crate::models::dsp::{DspDeliveryCounts, DspStatus};

const COLUMNS: &str = "id, name, status, last_check, error_message";

pub struct DspRepo;

impl DspRepo {
    /// Insert a new DSP entry.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        status: &str,
    ) -> Result<DspStatus, sqlx::Error> {
        let query = format!(
            "INSERT INTO dsp_statuses (name, status)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DspStatus>(&query)
            .bind(name)
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// Insert a DSP only if the name is not yet present. Returns `true` when
    /// a row was inserted.
    pub async fn create_if_absent(
        pool: &PgPool,
        name: &str,
        status: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO dsp_statuses (name, status)
             VALUES ($1, $2)
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(name)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DspStatus>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dsp_statuses WHERE id = $1");
        sqlx::query_as::<_, DspStatus>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all DSPs alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<DspStatus>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dsp_statuses ORDER BY name");
        sqlx::query_as::<_, DspStatus>(&query).fetch_all(pool).await
    }

    /// Update a DSP's status, refreshing `last_check`.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        error_message: Option<&str>,
    ) -> Result<Option<DspStatus>, sqlx::Error> {
        let query = format!(
            "UPDATE dsp_statuses SET
                status = $2,
                error_message = $3,
                last_check = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DspStatus>(&query)
            .bind(id)
            .bind(status)
            .bind(error_message)
            .fetch_optional(pool)
            .await
    }

    /// Per-DSP delivery counts across all distributions.
    ///
    /// A distribution targeting several DSPs counts once per target, which is
    /// what the delivery dashboard charts.
    pub async fn delivery_counts(
        pool: &PgPool,
    ) -> Result<BTreeMap<String, DspDeliveryCounts>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT dsp, status, COUNT(*) AS count
             FROM distributions, UNNEST(dsps) AS dsp
             GROUP BY dsp, status",
        )
        .fetch_all(pool)
        .await?;

        let mut by_dsp: BTreeMap<String, DspDeliveryCounts> = BTreeMap::new();
        for row in rows {
            let dsp: String = row.try_get("dsp")?;
            let status: String = row.try_get("status")?;
            let count: i64 = row.try_get("count")?;

            let entry = by_dsp.entry(dsp).or_default();
            entry.total += count;
            match status.as_str() {
                "delivered" => entry.successful += count,
                "failed" => entry.failed += count,
                "pending" | "processing" => entry.pending += count,
                _ => {}
            }
        }
        Ok(by_dsp)
    }
}
