//! Material database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for materials table
#[derive(Debug, Clone, FromRow)]
pub struct MaterialModel {
    pub id: i64,
    pub channel_id: i64,
    pub uploaded_by: i64,
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_path: String,
    pub mime_type: String,
    pub file_size: i64,
    pub status: String,
    pub reviewed_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
