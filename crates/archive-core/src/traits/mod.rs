//! Domain traits (ports)

mod repositories;

pub use repositories::{
    AccessRequestRepository, ChannelRepository, Deactivation, DownloadEntry, DownloadRepository,
    LoginRecord, MaterialRepository, MemberProfile, MembershipRepository, RepoResult,
    RequestProfile, UserRepository, VerificationRepository, WarningRepository,
};
