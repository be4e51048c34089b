//! Outbound notifications for the Single Audio platform.
//!
//! - [`Mailer`] — async SMTP delivery via `lettre`.
//! - [`EmailConfig`] — environment-driven SMTP configuration; `None` when
//!   email is not configured, in which case sends are skipped.
//! - [`templates`] — the HTML bodies for account and payout notifications.

pub mod mailer;
pub mod templates;

pub use mailer::{EmailConfig, EmailError, Mailer};
