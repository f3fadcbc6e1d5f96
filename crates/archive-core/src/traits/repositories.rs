//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Multi-row mutations (join + counter, request
//! approval, verification approval) are single trait methods so the
//! implementation can wrap them in one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    AccessRequest, Channel, DownloadRecord, Material, TeacherVerification, User, UserWarning,
};
use crate::error::DomainError;
use crate::value_objects::{ModerationStatus, Snowflake, UserRole};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

/// Deactivation state of a soft-deleted account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deactivation {
    pub at: DateTime<Utc>,
    pub reason: String,
}

/// Everything the login flow needs in one lookup
///
/// Unlike the normal finders this is fetched without the soft-delete filter,
/// so login can surface the stored deactivation reason.
#[derive(Debug, Clone)]
pub struct LoginRecord {
    pub user: User,
    pub password_hash: String,
    pub deactivation: Option<Deactivation>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an active user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find an active user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken by an active account
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Fetch credentials and deactivation state for login (no delete filter)
    async fn find_for_login(&self, email: &str) -> RepoResult<Option<LoginRecord>>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Create a teacher account together with its verification row, atomically
    async fn create_teacher(
        &self,
        user: &User,
        password_hash: &str,
        verification: &TeacherVerification,
    ) -> RepoResult<()>;

    /// Update profile fields of an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;

    /// Soft delete a user; the reason is stored and replayed at login
    async fn soft_delete(&self, id: Snowflake, reason: &str) -> RepoResult<()>;

    /// List active users, newest-first
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<User>>;

    /// Count active users per role
    async fn count_by_role(&self) -> RepoResult<Vec<(UserRole, i64)>>;
}

// ============================================================================
// Warning Repository
// ============================================================================

#[async_trait]
pub trait WarningRepository: Send + Sync {
    /// Append a warning to a user's record
    async fn create(&self, warning: &UserWarning) -> RepoResult<()>;

    /// List a user's warnings, oldest-first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<UserWarning>>;
}

// ============================================================================
// Teacher Verification Repository
// ============================================================================

#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Find verification by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<TeacherVerification>>;

    /// Find the verification belonging to a user
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<TeacherVerification>>;

    /// List pending verifications, oldest-first
    async fn list_pending(&self) -> RepoResult<Vec<TeacherVerification>>;

    /// Approve a pending verification and promote the owner to `teacher`,
    /// atomically. Fails with `AlreadyProcessed` if not pending.
    async fn approve(&self, id: Snowflake, reviewer_id: Snowflake) -> RepoResult<()>;

    /// Reject a pending verification with a reason.
    /// Fails with `AlreadyProcessed` if not pending.
    async fn reject(&self, id: Snowflake, reviewer_id: Snowflake, reason: &str) -> RepoResult<()>;
}

// ============================================================================
// Channel Repository
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Find a non-deleted channel by ID (any status)
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>>;

    /// Find a non-deleted channel by its access code
    async fn find_by_access_code(&self, code: &str) -> RepoResult<Option<Channel>>;

    /// List a teacher's own channels (all statuses), newest-first
    async fn find_by_owner(&self, owner_id: Snowflake) -> RepoResult<Vec<Channel>>;

    /// Search approved channels by title substring
    async fn search(&self, query: Option<&str>, limit: i64, offset: i64)
        -> RepoResult<Vec<Channel>>;

    /// List channels awaiting moderation, oldest-first
    async fn list_pending(&self) -> RepoResult<Vec<Channel>>;

    /// Create a new channel
    async fn create(&self, channel: &Channel) -> RepoResult<()>;

    /// Update title/slug/description/visibility
    async fn update(&self, channel: &Channel) -> RepoResult<()>;

    /// Approve a pending channel. A no-op if already in a terminal state.
    async fn approve(&self, id: Snowflake, reviewer_id: Snowflake) -> RepoResult<()>;

    /// Reject a pending channel. A no-op if already in a terminal state.
    async fn reject(&self, id: Snowflake, reviewer_id: Snowflake) -> RepoResult<()>;

    /// Soft delete a channel
    async fn soft_delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Count non-deleted channels per moderation status
    async fn count_by_status(&self) -> RepoResult<Vec<(ModerationStatus, i64)>>;
}

// ============================================================================
// Membership Repository
// ============================================================================

/// Membership joined with the member's identity
#[derive(Debug, Clone)]
pub struct MemberProfile {
    pub user_id: Snowflake,
    pub username: String,
    pub email: String,
    pub joined_at: DateTime<Utc>,
}

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Check if user is a member of the channel
    async fn is_member(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Insert a membership and increment the channel's subscriber count in
    /// one transaction. Returns `false` (and leaves the counter alone) if the
    /// membership already existed.
    async fn join(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Delete a membership and decrement the subscriber count (clamped at
    /// zero) in one transaction. Returns `false` if there was no membership.
    async fn leave(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// List channel members with identity, newest-first
    async fn members(&self, channel_id: Snowflake) -> RepoResult<Vec<MemberProfile>>;

    /// List the non-deleted channels a user has joined
    async fn channels_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<Channel>>;

    /// Total membership rows across all channels
    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Access Request Repository
// ============================================================================

/// Access request joined with the requester's identity
#[derive(Debug, Clone)]
pub struct RequestProfile {
    pub request: AccessRequest,
    pub username: String,
    pub email: String,
}

#[async_trait]
pub trait AccessRequestRepository: Send + Sync {
    /// Find request by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<AccessRequest>>;

    /// Check for an existing *pending* request for this (channel, user)
    async fn has_pending(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Create a new pending request
    async fn create(&self, request: &AccessRequest) -> RepoResult<()>;

    /// List a channel's pending requests with requester identity, newest-first
    async fn list_pending(&self, channel_id: Snowflake) -> RepoResult<Vec<RequestProfile>>;

    /// Approve a pending request: mark approved, create the membership if
    /// absent, and increment the subscriber count iff a membership row was
    /// inserted - all in one transaction. Fails with `AlreadyProcessed` if
    /// the request is not pending.
    async fn approve(&self, id: Snowflake, reviewer_id: Snowflake) -> RepoResult<()>;

    /// Reject a pending request. Fails with `AlreadyProcessed` if not pending.
    async fn reject(&self, id: Snowflake, reviewer_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Material Repository
// ============================================================================

#[async_trait]
pub trait MaterialRepository: Send + Sync {
    /// Find a non-deleted material by ID (any status)
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Material>>;

    /// List a channel's materials, newest-first. When `approved_only` is set,
    /// pending/rejected materials are filtered out.
    async fn find_by_channel(
        &self,
        channel_id: Snowflake,
        approved_only: bool,
    ) -> RepoResult<Vec<Material>>;

    /// List materials awaiting moderation, oldest-first
    async fn list_pending(&self) -> RepoResult<Vec<Material>>;

    /// Create a new material
    async fn create(&self, material: &Material) -> RepoResult<()>;

    /// Update metadata and file fields (content replacement resets status)
    async fn update(&self, material: &Material) -> RepoResult<()>;

    /// Approve a pending material. A no-op if already in a terminal state.
    async fn approve(&self, id: Snowflake, reviewer_id: Snowflake) -> RepoResult<()>;

    /// Reject a pending material. A no-op if already in a terminal state.
    async fn reject(&self, id: Snowflake, reviewer_id: Snowflake) -> RepoResult<()>;

    /// Soft-delete materials whose channel is soft-deleted; returns how many
    async fn soft_delete_orphaned(&self) -> RepoResult<u64>;

    /// Count non-deleted materials per moderation status
    async fn count_by_status(&self) -> RepoResult<Vec<(ModerationStatus, i64)>>;
}

// ============================================================================
// Download Repository
// ============================================================================

/// Download event joined with material and user identity
#[derive(Debug, Clone)]
pub struct DownloadEntry {
    pub record: DownloadRecord,
    pub material_title: String,
    pub username: String,
}

#[async_trait]
pub trait DownloadRepository: Send + Sync {
    /// Append a download event
    async fn record(&self, record: &DownloadRecord) -> RepoResult<()>;

    /// Recent downloads with identity, newest-first
    async fn recent(&self, limit: i64) -> RepoResult<Vec<DownloadEntry>>;

    /// Total recorded downloads
    async fn count(&self) -> RepoResult<i64>;
}
