pub mod admin;
pub mod ai;
pub mod auth;
pub mod cms;
pub mod dsp;
pub mod music;
pub mod payouts;
pub mod publishing;
pub mod royalties;
pub mod support;
pub mod user;
