//! Permission service
//!
//! Role and ownership checks shared by the other services. The persisted
//! role is authoritative: a token minted before a role change (or before a
//! deactivation) does not grant the old privileges.

use archive_core::entities::{Channel, User};
use archive_core::{DomainError, Snowflake};
use tracing::instrument;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Permission service
pub struct PermissionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PermissionService<'a> {
    /// Create a new PermissionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load the active user behind a token, or fail authentication
    ///
    /// A soft-deleted user is invisible here, so stale tokens of deactivated
    /// accounts stop working immediately.
    #[instrument(skip(self))]
    pub async fn require_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::UserNotFound(user_id)))
    }

    /// Require the administrator role
    #[instrument(skip(self))]
    pub async fn require_administrator(&self, user_id: Snowflake) -> ServiceResult<User> {
        let user = self.require_user(user_id).await?;
        if !user.is_administrator() {
            return Err(DomainError::AdministratorOnly.into());
        }
        Ok(user)
    }

    /// Require the teacher role (a pending teacher does not qualify)
    #[instrument(skip(self))]
    pub async fn require_teacher(&self, user_id: Snowflake) -> ServiceResult<User> {
        let user = self.require_user(user_id).await?;
        if !user.is_teacher() {
            return Err(DomainError::TeacherOnly.into());
        }
        Ok(user)
    }

    /// Require that the user owns the channel
    #[instrument(skip(self, channel))]
    pub async fn require_channel_owner(
        &self,
        channel: &Channel,
        user_id: Snowflake,
    ) -> ServiceResult<User> {
        let user = self.require_user(user_id).await?;
        if !channel.is_owned_by(user.id) {
            return Err(DomainError::NotChannelOwner.into());
        }
        Ok(user)
    }

    /// Check whether the user may moderate this channel (owner or admin)
    #[instrument(skip(self, channel))]
    pub async fn can_moderate_channel(
        &self,
        channel: &Channel,
        user_id: Snowflake,
    ) -> ServiceResult<User> {
        let user = self.require_user(user_id).await?;
        if channel.is_owned_by(user.id) || user.is_administrator() {
            Ok(user)
        } else {
            Err(DomainError::NotChannelOwner.into())
        }
    }
}
