//! Access request database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for access_requests table
#[derive(Debug, Clone, FromRow)]
pub struct AccessRequestModel {
    pub id: i64,
    pub channel_id: i64,
    pub user_id: i64,
    pub status: String,
    pub reviewed_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Request row joined with the requester's identity
#[derive(Debug, Clone, FromRow)]
pub struct RequestProfileModel {
    pub id: i64,
    pub channel_id: i64,
    pub user_id: i64,
    pub status: String,
    pub reviewed_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub username: String,
    pub email: String,
}
