//! Aggregate queries behind the admin dashboard and analytics endpoints.

use sqlx::PgPool;

use crate::models::dashboard::{
    DailyRevenue, DashboardStats, DistributionCounts, DspRevenue, PayoutTotals, RoyaltyTotals,
    TicketCounts, TopTrack, TrackCounts, UserCounts,
};

pub struct DashboardRepo;

impl DashboardRepo {
    /// All dashboard blocks in one round of queries.
    pub async fn stats(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        let users = sqlx::query_as::<_, UserCounts>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'approved') AS approved
             FROM users",
        )
        .fetch_one(pool)
        .await?;

        let tracks = sqlx::query_as::<_, TrackCounts>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'processing') AS processing,
                COUNT(*) FILTER (WHERE status = 'distributed') AS distributed
             FROM music_tracks",
        )
        .fetch_one(pool)
        .await?;

        let distributions = sqlx::query_as::<_, DistributionCounts>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'delivered') AS delivered,
                COUNT(*) FILTER (WHERE status = 'failed') AS failed
             FROM distributions",
        )
        .fetch_one(pool)
        .await?;

        let royalties = sqlx::query_as::<_, RoyaltyTotals>(
            "SELECT
                COALESCE(SUM(amount), 0)::double precision AS total_amount,
                COALESCE(SUM(amount) FILTER (
                    WHERE created_at >= date_trunc('month', NOW())
                ), 0)::double precision AS this_month
             FROM royalties",
        )
        .fetch_one(pool)
        .await?;

        let payouts = sqlx::query_as::<_, PayoutTotals>(
            "SELECT
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COALESCE(SUM(amount) FILTER (
                    WHERE status IN ('approved', 'processed')
                ), 0)::double precision AS total_amount
             FROM payout_requests",
        )
        .fetch_one(pool)
        .await?;

        let support_tickets = sqlx::query_as::<_, TicketCounts>(
            "SELECT
                COUNT(*) FILTER (WHERE status = 'open') AS open,
                COUNT(*) FILTER (
                    WHERE priority = 'urgent' AND status IN ('open', 'in_progress')
                ) AS urgent
             FROM support_tickets",
        )
        .fetch_one(pool)
        .await?;

        Ok(DashboardStats {
            users,
            tracks,
            distributions,
            royalties,
            payouts,
            support_tickets,
        })
    }

    /// Revenue per day over the last `days` days. Days without royalties are
    /// absent from the result.
    pub async fn daily_revenue(pool: &PgPool, days: i32) -> Result<Vec<DailyRevenue>, sqlx::Error> {
        sqlx::query_as::<_, DailyRevenue>(
            "SELECT
                created_at::date AS date,
                COALESCE(SUM(amount), 0)::double precision AS amount
             FROM royalties
             WHERE created_at >= NOW() - make_interval(days => $1)
             GROUP BY created_at::date
             ORDER BY date",
        )
        .bind(days)
        .fetch_all(pool)
        .await
    }

    /// Revenue per DSP over the last `days` days, largest first.
    pub async fn revenue_by_dsp(pool: &PgPool, days: i32) -> Result<Vec<DspRevenue>, sqlx::Error> {
        sqlx::query_as::<_, DspRevenue>(
            "SELECT
                dsp,
                COALESCE(SUM(amount), 0)::double precision AS amount
             FROM royalties
             WHERE created_at >= NOW() - make_interval(days => $1)
             GROUP BY dsp
             ORDER BY amount DESC",
        )
        .bind(days)
        .fetch_all(pool)
        .await
    }

    /// Highest-earning tracks over the last `days` days.
    pub async fn top_tracks(
        pool: &PgPool,
        days: i32,
        limit: i64,
    ) -> Result<Vec<TopTrack>, sqlx::Error> {
        sqlx::query_as::<_, TopTrack>(
            "SELECT
                t.id AS track_id,
                t.title,
                t.artist,
                COALESCE(SUM(r.amount), 0)::double precision AS total_revenue
             FROM royalties r
             JOIN music_tracks t ON t.id = r.track_id
             WHERE r.created_at >= NOW() - make_interval(days => $1)
             GROUP BY t.id, t.title, t.artist
             ORDER BY total_revenue DESC
             LIMIT $2",
        )
        .bind(days)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
