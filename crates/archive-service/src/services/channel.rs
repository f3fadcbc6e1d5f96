//! Channel service
//!
//! Channel CRUD, discovery, and the member listing. Moderation actions live
//! in the moderation service; join/leave in the membership service.

use archive_core::entities::{generate_access_code, Channel};
use archive_core::{DomainError, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{ChannelResponse, CreateChannelRequest, MemberResponse, UpdateChannelRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Channel service
pub struct ChannelService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChannelService<'a> {
    /// Create a new ChannelService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a channel; only verified teachers may publish
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create(
        &self,
        owner_id: Snowflake,
        request: CreateChannelRequest,
    ) -> ServiceResult<ChannelResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let permissions = PermissionService::new(self.ctx);
        let owner = permissions.require_teacher(owner_id).await?;

        let channel = Channel::new(
            self.ctx.generate_id(),
            owner.id,
            request.title,
            request.description,
            request.visibility,
            generate_access_code(),
        );

        self.ctx.channel_repo().create(&channel).await?;

        info!(
            channel_id = %channel.id,
            owner_id = %owner.id,
            "Channel created, pending moderation"
        );

        Ok(ChannelResponse::for_viewer(&channel, true))
    }

    /// Search approved channels
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<Vec<ChannelResponse>> {
        let channels = self.ctx.channel_repo().search(query, limit, offset).await?;
        Ok(channels.iter().map(ChannelResponse::from).collect())
    }

    /// List the caller's own channels (all statuses, with access codes)
    #[instrument(skip(self))]
    pub async fn my_channels(&self, owner_id: Snowflake) -> ServiceResult<Vec<ChannelResponse>> {
        let permissions = PermissionService::new(self.ctx);
        let owner = permissions.require_user(owner_id).await?;

        let channels = self.ctx.channel_repo().find_by_owner(owner.id).await?;

        Ok(channels
            .iter()
            .map(|c| ChannelResponse::for_viewer(c, true))
            .collect())
    }

    /// Fetch one channel
    ///
    /// An unapproved channel exists only for its owner and administrators;
    /// everyone else gets a not-found, not a forbidden, so the channel's
    /// existence is not leaked.
    #[instrument(skip(self))]
    pub async fn get(&self, channel_id: Snowflake, viewer_id: Snowflake) -> ServiceResult<ChannelResponse> {
        let channel = self.require_channel(channel_id).await?;

        let permissions = PermissionService::new(self.ctx);
        let viewer = permissions.require_user(viewer_id).await?;

        let privileged = channel.is_owned_by(viewer.id) || viewer.is_administrator();
        if !channel.is_approved() && !privileged {
            return Err(DomainError::ChannelNotFound(channel_id).into());
        }

        Ok(ChannelResponse::for_viewer(&channel, privileged))
    }

    /// Update title/description/visibility; only the owner may edit
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        channel_id: Snowflake,
        caller_id: Snowflake,
        request: UpdateChannelRequest,
    ) -> ServiceResult<ChannelResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let mut channel = self.require_channel(channel_id).await?;

        let permissions = PermissionService::new(self.ctx);
        permissions.require_channel_owner(&channel, caller_id).await?;

        if let Some(title) = request.title {
            channel.set_title(title);
        }
        if let Some(description) = request.description {
            channel.set_description(Some(description));
        }
        if let Some(visibility) = request.visibility {
            channel.set_visibility(visibility);
        }

        self.ctx.channel_repo().update(&channel).await?;

        info!(channel_id = %channel.id, "Channel updated");

        Ok(ChannelResponse::for_viewer(&channel, true))
    }

    /// Soft-delete a channel; the owner or an administrator may do this
    #[instrument(skip(self))]
    pub async fn delete(&self, channel_id: Snowflake, caller_id: Snowflake) -> ServiceResult<()> {
        let channel = self.require_channel(channel_id).await?;

        let permissions = PermissionService::new(self.ctx);
        let caller = permissions.can_moderate_channel(&channel, caller_id).await?;

        self.ctx.channel_repo().soft_delete(channel.id).await?;

        info!(channel_id = %channel.id, caller_id = %caller.id, "Channel soft-deleted");

        Ok(())
    }

    /// List channel members; restricted to the owning teacher
    #[instrument(skip(self))]
    pub async fn members(
        &self,
        channel_id: Snowflake,
        caller_id: Snowflake,
    ) -> ServiceResult<Vec<MemberResponse>> {
        let channel = self.require_channel(channel_id).await?;

        let permissions = PermissionService::new(self.ctx);
        permissions.require_channel_owner(&channel, caller_id).await?;

        let members = self.ctx.membership_repo().members(channel.id).await?;

        Ok(members.iter().map(MemberResponse::from).collect())
    }

    async fn require_channel(&self, channel_id: Snowflake) -> ServiceResult<Channel> {
        self.ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::ChannelNotFound(channel_id)))
    }
}
