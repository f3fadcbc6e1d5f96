//! User profile service

use archive_common::storage::FileKind;
use archive_core::{DomainError, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{ChannelResponse, CurrentUserResponse, UpdateProfileRequest, UploadedFile};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// User profile service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the current user's profile
    #[instrument(skip(self))]
    pub async fn me(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let permissions = PermissionService::new(self.ctx);
        let user = permissions.require_user(user_id).await?;
        Ok(CurrentUserResponse::from(&user))
    }

    /// Update the current user's profile fields
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let permissions = PermissionService::new(self.ctx);
        let mut user = permissions.require_user(user_id).await?;

        if let Some(username) = request.username {
            user.set_username(username);
        }
        if let Some(first_name) = request.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            user.last_name = last_name;
        }
        if let Some(school) = request.school {
            user.school = Some(school);
        }
        if let Some(gender) = request.gender {
            user.gender = Some(gender);
        }
        if let Some(birth_date) = request.birth_date {
            user.birth_date = Some(birth_date);
        }

        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user.id, "Profile updated");

        Ok(CurrentUserResponse::from(&user))
    }

    /// Replace the current user's profile image
    #[instrument(skip(self, file))]
    pub async fn set_avatar(
        &self,
        user_id: Snowflake,
        file: Option<UploadedFile>,
    ) -> ServiceResult<CurrentUserResponse> {
        let file = file.ok_or_else(|| {
            ServiceError::from(DomainError::ValidationError(
                "A profile image file is required".to_string(),
            ))
        })?;

        if !file.content_type.starts_with("image/") {
            return Err(DomainError::ValidationError(
                "Profile image must be an image file".to_string(),
            )
            .into());
        }

        let permissions = PermissionService::new(self.ctx);
        let mut user = permissions.require_user(user_id).await?;

        let path = self
            .ctx
            .storage()
            .save(
                FileKind::ProfileImage,
                user.id.into_inner(),
                &file.file_name,
                &file.bytes,
            )
            .await
            .map_err(ServiceError::from)?;

        let previous = user.avatar.clone();
        user.set_avatar(Some(path));
        self.ctx.user_repo().update(&user).await?;

        // The replaced image is dead weight; dropping it is best-effort
        if let Some(old) = previous {
            self.ctx.storage().remove(&old).await.ok();
        }

        info!(user_id = %user.id, "Profile image updated");

        Ok(CurrentUserResponse::from(&user))
    }

    /// List the channels the current user has joined
    #[instrument(skip(self))]
    pub async fn joined_channels(&self, user_id: Snowflake) -> ServiceResult<Vec<ChannelResponse>> {
        let permissions = PermissionService::new(self.ctx);
        let user = permissions.require_user(user_id).await?;

        let channels = self.ctx.membership_repo().channels_for_user(user.id).await?;

        Ok(channels.iter().map(ChannelResponse::from).collect())
    }
}
