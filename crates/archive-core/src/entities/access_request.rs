//! Access request - a student's request to join a private channel

use chrono::{DateTime, Utc};

use crate::value_objects::{ModerationStatus, Snowflake};

/// Access request entity
///
/// At most one *pending* request exists per (channel, user) pair; a rejected
/// request does not block a later one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub user_id: Snowflake,
    pub status: ModerationStatus,
    pub reviewed_by: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl AccessRequest {
    /// Create a new pending request
    pub fn new(id: Snowflake, channel_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            id,
            channel_id,
            user_id,
            status: ModerationStatus::Pending,
            reviewed_by: None,
            created_at: Utc::now(),
            reviewed_at: None,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_is_pending() {
        let request = AccessRequest::new(Snowflake::new(1), Snowflake::new(2), Snowflake::new(3));
        assert!(request.is_pending());
        assert!(request.reviewed_by.is_none());
        assert!(request.reviewed_at.is_none());
    }
}
