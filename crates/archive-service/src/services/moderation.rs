//! Moderation service
//!
//! Administrator-only operations: the pending queues and approve/reject
//! transitions for channels, materials, and teacher verifications, plus user
//! administration (soft delete, warnings), aggregate reports, the download
//! history, and the orphaned-material sweep.
//!
//! Transition semantics differ by kind on purpose: channels and materials
//! treat a repeated approve/reject as a harmless no-op, while teacher
//! verifications (like access requests) refuse with ALREADY_PROCESSED.

use archive_core::entities::UserWarning;
use archive_core::value_objects::UserRole;
use archive_core::{DomainError, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    ChannelResponse, DeleteUserRequest, DownloadEntryResponse, MaterialResponse,
    OrphanCleanupResponse, RejectRequest, RejectVerificationRequest, ReportResponse, StatusCounts,
    UserResponse, VerificationResponse, WarnUserRequest, WarningResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Moderation service
pub struct ModerationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ModerationService<'a> {
    /// Create a new ModerationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Channel moderation
    // ========================================================================

    /// Channels awaiting review, oldest-first
    #[instrument(skip(self))]
    pub async fn pending_channels(&self, admin_id: Snowflake) -> ServiceResult<Vec<ChannelResponse>> {
        self.require_admin(admin_id).await?;
        let channels = self.ctx.channel_repo().list_pending().await?;
        Ok(channels
            .iter()
            .map(|c| ChannelResponse::for_viewer(c, true))
            .collect())
    }

    /// Approve a channel
    #[instrument(skip(self))]
    pub async fn approve_channel(
        &self,
        channel_id: Snowflake,
        admin_id: Snowflake,
    ) -> ServiceResult<()> {
        let admin = self.require_admin(admin_id).await?;
        self.ctx.channel_repo().approve(channel_id, admin.id).await?;

        info!(channel_id = %channel_id, admin_id = %admin.id, "Channel approved");
        Ok(())
    }

    /// Reject a channel; the reason is accepted but optional
    #[instrument(skip(self, request))]
    pub async fn reject_channel(
        &self,
        channel_id: Snowflake,
        admin_id: Snowflake,
        request: RejectRequest,
    ) -> ServiceResult<()> {
        let admin = self.require_admin(admin_id).await?;
        self.ctx.channel_repo().reject(channel_id, admin.id).await?;

        info!(
            channel_id = %channel_id,
            admin_id = %admin.id,
            reason = request.reason.as_deref().unwrap_or(""),
            "Channel rejected"
        );
        Ok(())
    }

    // ========================================================================
    // Material moderation
    // ========================================================================

    /// Materials awaiting review, oldest-first
    #[instrument(skip(self))]
    pub async fn pending_materials(&self, admin_id: Snowflake) -> ServiceResult<Vec<MaterialResponse>> {
        self.require_admin(admin_id).await?;
        let materials = self.ctx.material_repo().list_pending().await?;
        Ok(materials.iter().map(MaterialResponse::from).collect())
    }

    /// Approve a material
    #[instrument(skip(self))]
    pub async fn approve_material(
        &self,
        material_id: Snowflake,
        admin_id: Snowflake,
    ) -> ServiceResult<()> {
        let admin = self.require_admin(admin_id).await?;
        self.ctx.material_repo().approve(material_id, admin.id).await?;

        info!(material_id = %material_id, admin_id = %admin.id, "Material approved");
        Ok(())
    }

    /// Reject a material; the reason is accepted but optional
    #[instrument(skip(self, request))]
    pub async fn reject_material(
        &self,
        material_id: Snowflake,
        admin_id: Snowflake,
        request: RejectRequest,
    ) -> ServiceResult<()> {
        let admin = self.require_admin(admin_id).await?;
        self.ctx.material_repo().reject(material_id, admin.id).await?;

        info!(
            material_id = %material_id,
            admin_id = %admin.id,
            reason = request.reason.as_deref().unwrap_or(""),
            "Material rejected"
        );
        Ok(())
    }

    // ========================================================================
    // Teacher verification
    // ========================================================================

    /// Verifications awaiting review, oldest-first
    #[instrument(skip(self))]
    pub async fn pending_verifications(
        &self,
        admin_id: Snowflake,
    ) -> ServiceResult<Vec<VerificationResponse>> {
        self.require_admin(admin_id).await?;
        let verifications = self.ctx.verification_repo().list_pending().await?;
        Ok(verifications.iter().map(VerificationResponse::from).collect())
    }

    /// Approve a verification, promoting the owner to `teacher`
    #[instrument(skip(self))]
    pub async fn approve_verification(
        &self,
        verification_id: Snowflake,
        admin_id: Snowflake,
    ) -> ServiceResult<()> {
        let admin = self.require_admin(admin_id).await?;
        self.ctx
            .verification_repo()
            .approve(verification_id, admin.id)
            .await?;

        info!(
            verification_id = %verification_id,
            admin_id = %admin.id,
            "Teacher verification approved"
        );
        Ok(())
    }

    /// Reject a verification; a non-empty reason is mandatory
    #[instrument(skip(self, request))]
    pub async fn reject_verification(
        &self,
        verification_id: Snowflake,
        admin_id: Snowflake,
        request: RejectVerificationRequest,
    ) -> ServiceResult<()> {
        let reason = request.reason.trim();
        if reason.is_empty() {
            return Err(DomainError::ReasonRequired.into());
        }

        let admin = self.require_admin(admin_id).await?;
        self.ctx
            .verification_repo()
            .reject(verification_id, admin.id, reason)
            .await?;

        info!(
            verification_id = %verification_id,
            admin_id = %admin.id,
            "Teacher verification rejected"
        );
        Ok(())
    }

    // ========================================================================
    // User administration
    // ========================================================================

    /// List active users
    #[instrument(skip(self))]
    pub async fn list_users(
        &self,
        admin_id: Snowflake,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<Vec<UserResponse>> {
        self.require_admin(admin_id).await?;
        let users = self.ctx.user_repo().list(limit, offset).await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Soft-delete a user; the non-empty reason is mandatory and will be
    /// shown to the user at their next login attempt
    #[instrument(skip(self, request))]
    pub async fn delete_user(
        &self,
        user_id: Snowflake,
        admin_id: Snowflake,
        request: DeleteUserRequest,
    ) -> ServiceResult<()> {
        let reason = request.reason.trim();
        if reason.is_empty() {
            return Err(DomainError::ReasonRequired.into());
        }

        let admin = self.require_admin(admin_id).await?;
        self.ctx.user_repo().soft_delete(user_id, reason).await?;

        info!(user_id = %user_id, admin_id = %admin.id, "User deactivated");
        Ok(())
    }

    /// Append a warning to a user's record
    #[instrument(skip(self, request))]
    pub async fn warn_user(
        &self,
        user_id: Snowflake,
        admin_id: Snowflake,
        request: WarnUserRequest,
    ) -> ServiceResult<WarningResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let admin = self.require_admin(admin_id).await?;

        // The target must exist (and be active)
        let permissions = PermissionService::new(self.ctx);
        let target = permissions.require_user(user_id).await?;

        let warning = UserWarning::new(
            self.ctx.generate_id(),
            target.id,
            admin.id,
            request.message,
        );
        self.ctx.warning_repo().create(&warning).await?;

        info!(user_id = %target.id, admin_id = %admin.id, "Warning issued");

        Ok(WarningResponse::from(&warning))
    }

    /// List a user's warnings, oldest-first
    #[instrument(skip(self))]
    pub async fn user_warnings(
        &self,
        user_id: Snowflake,
        admin_id: Snowflake,
    ) -> ServiceResult<Vec<WarningResponse>> {
        self.require_admin(admin_id).await?;
        let warnings = self.ctx.warning_repo().find_by_user(user_id).await?;
        Ok(warnings.iter().map(WarningResponse::from).collect())
    }

    // ========================================================================
    // Reports & maintenance
    // ========================================================================

    /// Aggregate platform counts
    #[instrument(skip(self))]
    pub async fn report(&self, admin_id: Snowflake) -> ServiceResult<ReportResponse> {
        self.require_admin(admin_id).await?;

        let roles = self.ctx.user_repo().count_by_role().await?;
        let role_count = |role: UserRole| {
            roles
                .iter()
                .find(|(r, _)| *r == role)
                .map_or(0, |(_, count)| *count)
        };

        let channels = self.ctx.channel_repo().count_by_status().await?;
        let materials = self.ctx.material_repo().count_by_status().await?;

        Ok(ReportResponse {
            students: role_count(UserRole::Student),
            teachers: role_count(UserRole::Teacher),
            pending_teachers: role_count(UserRole::TeacherPending),
            administrators: role_count(UserRole::Administrator),
            channels: StatusCounts::from_rows(&channels),
            materials: StatusCounts::from_rows(&materials),
            total_memberships: self.ctx.membership_repo().count().await?,
            total_downloads: self.ctx.download_repo().count().await?,
        })
    }

    /// Recent download history
    #[instrument(skip(self))]
    pub async fn download_history(
        &self,
        admin_id: Snowflake,
        limit: i64,
    ) -> ServiceResult<Vec<DownloadEntryResponse>> {
        self.require_admin(admin_id).await?;
        let entries = self.ctx.download_repo().recent(limit).await?;
        Ok(entries.iter().map(DownloadEntryResponse::from).collect())
    }

    /// Soft-delete materials whose channel is soft-deleted
    #[instrument(skip(self))]
    pub async fn cleanup_orphans(&self, admin_id: Snowflake) -> ServiceResult<OrphanCleanupResponse> {
        let admin = self.require_admin(admin_id).await?;
        let removed = self.ctx.material_repo().soft_delete_orphaned().await?;

        info!(admin_id = %admin.id, removed, "Orphaned materials swept");

        Ok(OrphanCleanupResponse { removed })
    }

    async fn require_admin(&self, admin_id: Snowflake) -> ServiceResult<archive_core::entities::User> {
        PermissionService::new(self.ctx)
            .require_administrator(admin_id)
            .await
    }
}
