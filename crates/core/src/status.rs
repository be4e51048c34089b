//! Status vocabularies for every entity carrying a status column.
//!
//! Statuses are stored as plain text in Postgres (with CHECK constraints) and
//! travel through the API as strings. The constants here are the single place
//! the legal values are spelled out in Rust.

/// `users.status` and `access_requests.status`.
pub mod account {
    pub const PENDING: &str = "pending";
    pub const APPROVED: &str = "approved";
    pub const REJECTED: &str = "rejected";

    pub const ALL: &[&str] = &[PENDING, APPROVED, REJECTED];
}

/// `music_tracks.status`.
pub mod track {
    pub const DRAFT: &str = "draft";
    pub const PROCESSING: &str = "processing";
    pub const DISTRIBUTED: &str = "distributed";
    pub const FAILED: &str = "failed";

    pub const ALL: &[&str] = &[DRAFT, PROCESSING, DISTRIBUTED, FAILED];
}

/// `distributions.status`.
pub mod distribution {
    pub const PENDING: &str = "pending";
    pub const PROCESSING: &str = "processing";
    pub const DELIVERED: &str = "delivered";
    pub const FAILED: &str = "failed";

    pub const ALL: &[&str] = &[PENDING, PROCESSING, DELIVERED, FAILED];
}

/// `dsp_statuses.status`.
pub mod dsp {
    pub const ACTIVE: &str = "active";
    pub const MAINTENANCE: &str = "maintenance";
    pub const DISABLED: &str = "disabled";
}

/// `payout_requests.status`.
pub mod payout {
    pub const PENDING: &str = "pending";
    pub const APPROVED: &str = "approved";
    pub const PROCESSED: &str = "processed";
    pub const REJECTED: &str = "rejected";

    /// Statuses that count against a user's available balance.
    pub const BALANCE_HOLDING: &[&str] = &[APPROVED, PROCESSED];
}

/// `publishing_identities.status`.
pub mod identity {
    pub const PENDING: &str = "pending";
    pub const APPROVED: &str = "approved";
    pub const REJECTED: &str = "rejected";
}

/// `support_tickets.status`.
pub mod ticket {
    pub const OPEN: &str = "open";
    pub const IN_PROGRESS: &str = "in_progress";
    pub const RESOLVED: &str = "resolved";
    pub const CLOSED: &str = "closed";
}

/// `youtube_channels.status`.
pub mod channel {
    pub const ACTIVE: &str = "active";
    pub const EXPIRED: &str = "expired";
    pub const REVOKED: &str = "revoked";
}

/// `content_id_claims.status` and `content_id_claims.policy`.
pub mod claim {
    pub const ACTIVE: &str = "active";
    pub const DISPUTED: &str = "disputed";
    pub const RESOLVED: &str = "resolved";

    pub const ALL: &[&str] = &[ACTIVE, DISPUTED, RESOLVED];

    pub const POLICY_MONETIZE: &str = "monetize";
    pub const POLICY_TRACK: &str = "track";
    pub const POLICY_BLOCK: &str = "block";

    pub const POLICIES: &[&str] = &[POLICY_MONETIZE, POLICY_TRACK, POLICY_BLOCK];
}

/// DSP names seeded by the admin initialize endpoint.
pub const DEFAULT_DSPS: &[&str] = &[
    "YouTube Music",
    "YouTube Content ID",
    "Facebook Rights Manager",
    "Facebook Audio Library",
    "TikTok",
    "Audius",
    "SoundCloud",
    "Bandcamp",
    "Spotify",
];
