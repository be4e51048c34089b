mod access_request_repo;
mod channel_repo;
mod claim_repo;
mod composition_repo;
mod dashboard_repo;
mod distribution_repo;
mod dsp_repo;
mod identity_repo;
mod payout_repo;
mod profile_repo;
mod royalty_repo;
mod ticket_message_repo;
mod ticket_repo;
mod track_repo;
mod user_repo;

pub use access_request_repo::AccessRequestRepo;
pub use channel_repo::ChannelRepo;
pub use claim_repo::ClaimRepo;
pub use composition_repo::CompositionRepo;
pub use dashboard_repo::DashboardRepo;
pub use distribution_repo::DistributionRepo;
pub use dsp_repo::DspRepo;
pub use identity_repo::IdentityRepo;
pub use payout_repo::PayoutRepo;
pub use profile_repo::ProfileRepo;
pub use royalty_repo::RoyaltyRepo;
pub use ticket_message_repo::TicketMessageRepo;
pub use ticket_repo::TicketRepo;
pub use track_repo::TrackRepo;
pub use user_repo::UserRepo;
