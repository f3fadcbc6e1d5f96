//! Channel membership - the join relation between a user and a channel

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Membership row; at most one per (channel, user) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMembership {
    pub channel_id: Snowflake,
    pub user_id: Snowflake,
    pub joined_at: DateTime<Utc>,
}

impl ChannelMembership {
    /// Create a new membership joined now
    pub fn new(channel_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            channel_id,
            user_id,
            joined_at: Utc::now(),
        }
    }
}
