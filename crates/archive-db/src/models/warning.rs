//! User warning database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for user_warnings table
#[derive(Debug, Clone, FromRow)]
pub struct WarningModel {
    pub id: i64,
    pub user_id: i64,
    pub issued_by: i64,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
