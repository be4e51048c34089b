pub mod access_request;
pub mod channel;
pub mod claim;
pub mod composition;
pub mod dashboard;
pub mod distribution;
pub mod dsp;
pub mod identity;
pub mod payout;
pub mod profile;
pub mod royalty;
pub mod ticket;
pub mod ticket_message;
pub mod track;
pub mod user;
