//! Channel membership database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for channel_members table
#[derive(Debug, Clone, FromRow)]
pub struct MembershipModel {
    pub channel_id: i64,
    pub user_id: i64,
    pub joined_at: DateTime<Utc>,
}

/// Membership row joined with the member's identity
#[derive(Debug, Clone, FromRow)]
pub struct MemberProfileModel {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub joined_at: DateTime<Utc>,
}
