//! User warning - a moderation note issued to a user by an administrator

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Warning entry; warnings accumulate as an ordered list per user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWarning {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub issued_by: Snowflake,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl UserWarning {
    /// Create a new warning timestamped now
    pub fn new(id: Snowflake, user_id: Snowflake, issued_by: Snowflake, message: String) -> Self {
        Self {
            id,
            user_id,
            issued_by,
            message,
            created_at: Utc::now(),
        }
    }
}
