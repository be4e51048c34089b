use std::sync::Arc;

use singleaudio_core::types::Timestamp;
use singleaudio_events::Mailer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: singleaudio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// SMTP mailer. `None` when SMTP is not configured; sends are skipped.
    pub mailer: Option<Arc<Mailer>>,
    /// Process start time, reported by the admin stats endpoint.
    pub started_at: Timestamp,
}
