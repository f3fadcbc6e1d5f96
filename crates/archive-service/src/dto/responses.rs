//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use archive_core::entities::Visibility;
use archive_core::value_objects::{ModerationStatus, UserRole};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness probe response with dependency health
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: bool,
}

impl ReadinessResponse {
    #[must_use]
    pub fn ready(database: bool) -> Self {
        Self {
            ready: database,
            database,
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with bearer token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

impl AuthResponse {
    pub fn new(access_token: String, expires_in: i64, user: CurrentUserResponse) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user response (limited fields)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Current authenticated user response (includes email and legal name)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Warning entry on a user's record
#[derive(Debug, Clone, Serialize)]
pub struct WarningResponse {
    pub id: String,
    pub message: String,
    pub issued_by: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Channel Responses
// ============================================================================

/// Channel response
///
/// The access code is the invite secret: it is present only when the viewer
/// owns the channel (or is an administrator).
#[derive(Debug, Clone, Serialize)]
pub struct ChannelResponse {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub visibility: Visibility,
    pub status: ModerationStatus,
    pub subscriber_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Result of a join operation
#[derive(Debug, Serialize)]
pub struct JoinResponse {
    pub channel: ChannelResponse,
    /// False when the caller was already a member (the join is a no-op)
    pub newly_joined: bool,
}

/// Channel member entry (owner-only listing)
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub joined_at: DateTime<Utc>,
}

// ============================================================================
// Access Request Responses
// ============================================================================

/// Access request entry
#[derive(Debug, Clone, Serialize)]
pub struct AccessRequestResponse {
    pub id: String,
    pub channel_id: String,
    pub user_id: String,
    pub status: ModerationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Material Responses
// ============================================================================

/// Material metadata response
#[derive(Debug, Clone, Serialize)]
pub struct MaterialResponse {
    pub id: String,
    pub channel_id: String,
    pub uploaded_by: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub file_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub status: ModerationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Moderation Responses
// ============================================================================

/// Teacher verification entry
#[derive(Debug, Clone, Serialize)]
pub struct VerificationResponse {
    pub id: String,
    pub user_id: String,
    pub proof_document: String,
    pub status: ModerationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Counts per moderation status
#[derive(Debug, Clone, Serialize, Default)]
pub struct StatusCounts {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

impl StatusCounts {
    /// Build from grouped (status, count) rows
    pub fn from_rows(rows: &[(ModerationStatus, i64)]) -> Self {
        let mut counts = Self::default();
        for (status, count) in rows {
            match status {
                ModerationStatus::Pending => counts.pending = *count,
                ModerationStatus::Approved => counts.approved = *count,
                ModerationStatus::Rejected => counts.rejected = *count,
            }
        }
        counts
    }
}

/// Aggregate platform report for administrators
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub students: i64,
    pub teachers: i64,
    pub pending_teachers: i64,
    pub administrators: i64,
    pub channels: StatusCounts,
    pub materials: StatusCounts,
    pub total_memberships: i64,
    pub total_downloads: i64,
}

/// Download audit entry
#[derive(Debug, Clone, Serialize)]
pub struct DownloadEntryResponse {
    pub material_id: String,
    pub material_title: String,
    pub user_id: String,
    pub username: String,
    pub downloaded_at: DateTime<Utc>,
}

/// Result of the orphaned-material sweep
#[derive(Debug, Serialize)]
pub struct OrphanCleanupResponse {
    pub removed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_counts_from_rows() {
        let rows = vec![
            (ModerationStatus::Pending, 3),
            (ModerationStatus::Approved, 10),
        ];
        let counts = StatusCounts::from_rows(&rows);
        assert_eq!(counts.pending, 3);
        assert_eq!(counts.approved, 10);
        assert_eq!(counts.rejected, 0);
    }
}
