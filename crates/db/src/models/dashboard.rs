//! Aggregate shapes served by the admin dashboard and analytics endpoints.

use chrono::NaiveDate;
use serde::Serialize;
use singleaudio_core::types::DbId;
use sqlx::FromRow;

/// Top-level admin dashboard statistics, one block per domain.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub users: UserCounts,
    pub tracks: TrackCounts,
    pub distributions: DistributionCounts,
    pub royalties: RoyaltyTotals,
    pub payouts: PayoutTotals,
    pub support_tickets: TicketCounts,
}

#[derive(Debug, Serialize, FromRow)]
pub struct UserCounts {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct TrackCounts {
    pub total: i64,
    pub processing: i64,
    pub distributed: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct DistributionCounts {
    pub total: i64,
    pub pending: i64,
    pub delivered: i64,
    pub failed: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct RoyaltyTotals {
    pub total_amount: f64,
    pub this_month: f64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct PayoutTotals {
    pub pending: i64,
    pub total_amount: f64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct TicketCounts {
    pub open: i64,
    pub urgent: i64,
}

/// One day of revenue for the analytics chart.
#[derive(Debug, Serialize, FromRow)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Revenue attributed to one DSP over the analytics window.
#[derive(Debug, Serialize, FromRow)]
pub struct DspRevenue {
    pub dsp: String,
    pub amount: f64,
}

/// A top-earning track over the analytics window.
#[derive(Debug, Serialize, FromRow)]
pub struct TopTrack {
    pub track_id: DbId,
    pub title: String,
    pub artist: String,
    pub total_revenue: f64,
}
