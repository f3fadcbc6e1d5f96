//! Material download database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for material_downloads table
#[derive(Debug, Clone, FromRow)]
pub struct DownloadModel {
    pub id: i64,
    pub material_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Download row joined with material and user identity
#[derive(Debug, Clone, FromRow)]
pub struct DownloadEntryModel {
    pub id: i64,
    pub material_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub material_title: String,
    pub username: String,
}
