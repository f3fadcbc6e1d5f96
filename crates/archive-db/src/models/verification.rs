//! Teacher verification database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for teacher_verifications table
#[derive(Debug, Clone, FromRow)]
pub struct VerificationModel {
    pub id: i64,
    pub user_id: i64,
    pub proof_document: String,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}
