//! Earnings aggregation over fetched royalty rows.
//!
//! Input is the minimal `(amount, dsp, created_at)` projection the royalty
//! repository returns; output is the summary shape the user-facing earnings
//! endpoints serve.

use std::collections::BTreeMap;

use chrono::{Datelike, TimeZone, Utc};
use serde::Serialize;

use crate::types::Timestamp;

/// One royalty entry, projected down to what aggregation needs.
#[derive(Debug, Clone)]
pub struct RoyaltyEntry {
    pub amount: f64,
    pub dsp: String,
    pub created_at: Timestamp,
}

/// Aggregate earnings for a user.
#[derive(Debug, Serialize, PartialEq)]
pub struct EarningsSummary {
    pub total: f64,
    pub this_month: f64,
    pub last_month: f64,
    pub by_dsp: BTreeMap<String, f64>,
}

/// Earnings bucketed into one `YYYY-MM` month.
#[derive(Debug, Serialize, PartialEq)]
pub struct MonthlyEarnings {
    pub month: String,
    pub amount: f64,
}

/// Summarize royalties relative to `now`: lifetime total, calendar this-month
/// and last-month totals, and a per-DSP breakdown.
pub fn summarize(entries: &[RoyaltyEntry], now: Timestamp) -> EarningsSummary {
    let this_month_start = Utc
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .unwrap();
    let (last_year, last_month) = if now.month() == 1 {
        (now.year() - 1, 12)
    } else {
        (now.year(), now.month() - 1)
    };
    let last_month_start = Utc
        .with_ymd_and_hms(last_year, last_month, 1, 0, 0, 0)
        .unwrap();

    let mut summary = EarningsSummary {
        total: 0.0,
        this_month: 0.0,
        last_month: 0.0,
        by_dsp: BTreeMap::new(),
    };

    for entry in entries {
        summary.total += entry.amount;
        if entry.created_at >= this_month_start {
            summary.this_month += entry.amount;
        } else if entry.created_at >= last_month_start {
            summary.last_month += entry.amount;
        }
        *summary.by_dsp.entry(entry.dsp.clone()).or_insert(0.0) += entry.amount;
    }

    summary
}

/// Group royalties into `YYYY-MM` buckets, oldest month first.
pub fn by_month(entries: &[RoyaltyEntry]) -> Vec<MonthlyEarnings> {
    let mut buckets: BTreeMap<String, f64> = BTreeMap::new();
    for entry in entries {
        let month = entry.created_at.format("%Y-%m").to_string();
        *buckets.entry(month).or_insert(0.0) += entry.amount;
    }
    buckets
        .into_iter()
        .map(|(month, amount)| MonthlyEarnings { month, amount })
        .collect()
}
