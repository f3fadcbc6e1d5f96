//! Membership service
//!
//! Joining by access code, public join, and leaving. The repository pairs
//! each membership mutation with the subscriber counter in one transaction;
//! this service adds the channel-state checks in front.

use archive_core::entities::Channel;
use archive_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{ChannelResponse, JoinResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Membership service
pub struct MembershipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MembershipService<'a> {
    /// Create a new MembershipService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Join a channel via its access code (works for private channels too)
    #[instrument(skip(self, code))]
    pub async fn join_by_code(&self, user_id: Snowflake, code: &str) -> ServiceResult<JoinResponse> {
        let channel = self
            .ctx
            .channel_repo()
            .find_by_access_code(code)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::AccessCodeNotFound))?;

        self.join_checked(channel, user_id).await
    }

    /// Join a public channel directly
    #[instrument(skip(self))]
    pub async fn join_public(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<JoinResponse> {
        let channel = self
            .ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::ChannelNotFound(channel_id)))?;

        if channel.is_private() {
            return Err(DomainError::ChannelNotPublic.into());
        }

        self.join_checked(channel, user_id).await
    }

    /// Leave a channel
    #[instrument(skip(self))]
    pub async fn leave(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let channel = self
            .ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::ChannelNotFound(channel_id)))?;

        let permissions = PermissionService::new(self.ctx);
        let user = permissions.require_user(user_id).await?;

        let left = self.ctx.membership_repo().leave(channel.id, user.id).await?;
        if !left {
            // No membership: the counter was not touched
            return Err(DomainError::MembershipNotFound.into());
        }

        info!(channel_id = %channel.id, user_id = %user.id, "Left channel");

        Ok(())
    }

    /// Shared join path: state checks, then the transactional insert+increment
    async fn join_checked(&self, channel: Channel, user_id: Snowflake) -> ServiceResult<JoinResponse> {
        if !channel.is_approved() {
            return Err(DomainError::ChannelNotApproved.into());
        }

        let permissions = PermissionService::new(self.ctx);
        let user = permissions.require_user(user_id).await?;

        // Re-joining is a successful no-op, not an error
        let newly_joined = self.ctx.membership_repo().join(channel.id, user.id).await?;

        if newly_joined {
            info!(channel_id = %channel.id, user_id = %user.id, "Joined channel");
        }

        Ok(JoinResponse {
            channel: ChannelResponse::from(&channel),
            newly_joined,
        })
    }
}
