//! Channel database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for channels table
#[derive(Debug, Clone, FromRow)]
pub struct ChannelModel {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub access_code: String,
    pub visibility: String,
    pub status: String,
    pub subscriber_count: i64,
    pub reviewed_by: Option<i64>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
