//! Access request service
//!
//! Private-channel access requests: students ask, the owner (or an
//! administrator) approves or rejects. Approval creates the membership and
//! moves the subscriber counter in the same repository transaction that
//! flips the request status.

use archive_core::entities::AccessRequest;
use archive_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::AccessRequestResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Access request service
pub struct AccessRequestService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccessRequestService<'a> {
    /// Create a new AccessRequestService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Request access to a private channel
    #[instrument(skip(self))]
    pub async fn request(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<AccessRequestResponse> {
        let channel = self
            .ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::ChannelNotFound(channel_id)))?;

        if !channel.is_private() {
            return Err(DomainError::ChannelNotPrivate.into());
        }
        if !channel.is_approved() {
            return Err(DomainError::ChannelNotApproved.into());
        }

        let permissions = PermissionService::new(self.ctx);
        let user = permissions.require_user(user_id).await?;

        if self
            .ctx
            .membership_repo()
            .is_member(channel.id, user.id)
            .await?
        {
            return Err(DomainError::AlreadyMember.into());
        }

        // Only a pending request blocks a new one; a rejected request does
        // not lock the student out. The partial unique index backs this up
        // under races.
        if self
            .ctx
            .access_request_repo()
            .has_pending(channel.id, user.id)
            .await?
        {
            return Err(DomainError::DuplicateRequest.into());
        }

        let request = AccessRequest::new(self.ctx.generate_id(), channel.id, user.id);
        self.ctx.access_request_repo().create(&request).await?;

        info!(
            request_id = %request.id,
            channel_id = %channel.id,
            user_id = %user.id,
            "Access requested"
        );

        Ok(AccessRequestResponse::from(&request))
    }

    /// List a channel's pending requests; owner or administrator only
    #[instrument(skip(self))]
    pub async fn list_pending(
        &self,
        channel_id: Snowflake,
        caller_id: Snowflake,
    ) -> ServiceResult<Vec<AccessRequestResponse>> {
        let channel = self
            .ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::ChannelNotFound(channel_id)))?;

        let permissions = PermissionService::new(self.ctx);
        permissions.can_moderate_channel(&channel, caller_id).await?;

        let requests = self.ctx.access_request_repo().list_pending(channel.id).await?;

        Ok(requests.iter().map(AccessRequestResponse::from).collect())
    }

    /// Approve a pending request; owner or administrator only
    #[instrument(skip(self))]
    pub async fn approve(&self, request_id: Snowflake, caller_id: Snowflake) -> ServiceResult<()> {
        let (request, caller) = self.load_for_review(request_id, caller_id).await?;

        self.ctx
            .access_request_repo()
            .approve(request.id, caller.id)
            .await?;

        info!(
            request_id = %request.id,
            channel_id = %request.channel_id,
            reviewer_id = %caller.id,
            "Access request approved"
        );

        Ok(())
    }

    /// Reject a pending request; owner or administrator only
    #[instrument(skip(self))]
    pub async fn reject(&self, request_id: Snowflake, caller_id: Snowflake) -> ServiceResult<()> {
        let (request, caller) = self.load_for_review(request_id, caller_id).await?;

        self.ctx
            .access_request_repo()
            .reject(request.id, caller.id)
            .await?;

        info!(
            request_id = %request.id,
            channel_id = %request.channel_id,
            reviewer_id = %caller.id,
            "Access request rejected"
        );

        Ok(())
    }

    /// Load the request and authorize the reviewer
    async fn load_for_review(
        &self,
        request_id: Snowflake,
        caller_id: Snowflake,
    ) -> ServiceResult<(AccessRequest, archive_core::entities::User)> {
        let request = self
            .ctx
            .access_request_repo()
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::AccessRequestNotFound(request_id)))?;

        let channel = self
            .ctx
            .channel_repo()
            .find_by_id(request.channel_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::ChannelNotFound(request.channel_id)))?;

        let permissions = PermissionService::new(self.ctx);
        let caller = permissions.can_moderate_channel(&channel, caller_id).await?;

        Ok((request, caller))
    }
}
