//! Membership entity <-> model mapper

use archive_core::entities::ChannelMembership;
use archive_core::traits::MemberProfile;
use archive_core::value_objects::Snowflake;

use crate::models::{MemberProfileModel, MembershipModel};

impl From<MembershipModel> for ChannelMembership {
    fn from(model: MembershipModel) -> Self {
        ChannelMembership {
            channel_id: Snowflake::new(model.channel_id),
            user_id: Snowflake::new(model.user_id),
            joined_at: model.joined_at,
        }
    }
}

/// Convert a joined membership row into a member profile
pub fn member_profile(model: MemberProfileModel) -> MemberProfile {
    MemberProfile {
        user_id: Snowflake::new(model.user_id),
        username: model.username,
        email: model.email,
        joined_at: model.joined_at,
    }
}
