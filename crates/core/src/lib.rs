//! Domain logic for the Single Audio platform.
//!
//! Everything in this crate is pure: no database handles, no HTTP types.
//! The api and db crates depend on these modules for shared types, role and
//! status vocabularies, and the handful of computations the platform performs
//! over already-fetched rows (balances, earnings buckets, forecasts).

pub mod balance;
pub mod earnings;
pub mod error;
pub mod forecast;
pub mod roles;
pub mod status;
pub mod types;
pub mod upload;
