//! Material service
//!
//! Upload, metadata, content replacement, and the download/preview path with
//! its best-effort audit log.

use std::path::PathBuf;

use archive_common::storage::FileKind;
use archive_core::entities::{Channel, DownloadRecord, Material, User};
use archive_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{CreateMaterialRequest, MaterialResponse, UpdateMaterialRequest, UploadedFile};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// A material resolved for streaming
#[derive(Debug)]
pub struct MaterialFile {
    pub material: Material,
    pub path: PathBuf,
}

/// Material service
pub struct MaterialService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MaterialService<'a> {
    /// Create a new MaterialService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Upload a material to a channel
    ///
    /// The caller must be a teacher and own the channel; `uploaded_by` is
    /// therefore always the channel owner.
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn upload(
        &self,
        channel_id: Snowflake,
        caller_id: Snowflake,
        request: CreateMaterialRequest,
    ) -> ServiceResult<MaterialResponse> {
        let file = request.file.ok_or_else(|| {
            ServiceError::from(DomainError::ValidationError(
                "A material file is required".to_string(),
            ))
        })?;
        validate_title(&request.title)?;

        let channel = self.require_channel(channel_id).await?;

        let permissions = PermissionService::new(self.ctx);
        permissions.require_teacher(caller_id).await?;
        let owner = permissions.require_channel_owner(&channel, caller_id).await?;

        let file_path = self.store_file(&owner, &file).await?;

        let file_size = file.size();
        let material = Material::new(
            self.ctx.generate_id(),
            channel.id,
            owner.id,
            request.title,
            request.description,
            file.file_name,
            file_path.clone(),
            file.content_type,
            file_size,
        );

        if let Err(e) = self.ctx.material_repo().create(&material).await {
            // Don't leave an unreferenced file behind
            self.ctx.storage().remove(&file_path).await.ok();
            return Err(e.into());
        }

        info!(
            material_id = %material.id,
            channel_id = %channel.id,
            "Material uploaded, pending moderation"
        );

        Ok(MaterialResponse::from(&material))
    }

    /// List a channel's materials
    ///
    /// The owner and administrators see every status; everyone else sees
    /// approved materials only.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        channel_id: Snowflake,
        caller_id: Snowflake,
    ) -> ServiceResult<Vec<MaterialResponse>> {
        let channel = self.require_channel(channel_id).await?;

        let permissions = PermissionService::new(self.ctx);
        let caller = permissions.require_user(caller_id).await?;

        let privileged = channel.is_owned_by(caller.id) || caller.is_administrator();
        if !channel.is_approved() && !privileged {
            return Err(DomainError::ChannelNotFound(channel_id).into());
        }

        let materials = self
            .ctx
            .material_repo()
            .find_by_channel(channel.id, !privileged)
            .await?;

        Ok(materials.iter().map(MaterialResponse::from).collect())
    }

    /// Fetch one material's metadata, with the same visibility gating
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        material_id: Snowflake,
        caller_id: Snowflake,
    ) -> ServiceResult<MaterialResponse> {
        let (material, _) = self.load_visible(material_id, caller_id).await?;
        Ok(MaterialResponse::from(&material))
    }

    /// Update metadata; replacing the file sends the material back through
    /// moderation. Only the uploader (= channel owner) may edit.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        material_id: Snowflake,
        caller_id: Snowflake,
        request: UpdateMaterialRequest,
    ) -> ServiceResult<MaterialResponse> {
        let mut material = self.require_material(material_id).await?;
        let channel = self.require_channel(material.channel_id).await?;

        let permissions = PermissionService::new(self.ctx);
        let owner = permissions.require_channel_owner(&channel, caller_id).await?;

        if let Some(title) = request.title {
            validate_title(&title)?;
            material.title = title;
        }
        if let Some(description) = request.description {
            material.description = Some(description);
        }

        let mut replaced_path = None;
        if let Some(file) = request.file {
            let file_path = self.store_file(&owner, &file).await?;
            replaced_path = Some(material.file_path.clone());
            let file_size = file.size();
            material.replace_file(file.file_name, file_path, file.content_type, file_size);
        }

        self.ctx.material_repo().update(&material).await?;

        if let Some(old) = replaced_path {
            self.ctx.storage().remove(&old).await.ok();
        }

        info!(material_id = %material.id, "Material updated");

        Ok(MaterialResponse::from(&material))
    }

    /// Resolve a material for download and log the download event
    ///
    /// The audit write is best-effort: a failure is logged and swallowed, it
    /// never blocks the download itself.
    #[instrument(skip(self))]
    pub async fn download(
        &self,
        material_id: Snowflake,
        caller_id: Snowflake,
    ) -> ServiceResult<MaterialFile> {
        let (material, caller) = self.load_visible(material_id, caller_id).await?;

        let path = self
            .ctx
            .storage()
            .resolve(&material.file_path)
            .map_err(ServiceError::from)?;

        let record = DownloadRecord::new(self.ctx.generate_id(), material.id, caller.id);
        if let Err(e) = self.ctx.download_repo().record(&record).await {
            warn!(material_id = %material.id, error = %e, "Failed to log download");
        }

        Ok(MaterialFile { material, path })
    }

    /// Resolve a material for inline preview (no audit entry)
    #[instrument(skip(self))]
    pub async fn preview(
        &self,
        material_id: Snowflake,
        caller_id: Snowflake,
    ) -> ServiceResult<MaterialFile> {
        let (material, _) = self.load_visible(material_id, caller_id).await?;

        let path = self
            .ctx
            .storage()
            .resolve(&material.file_path)
            .map_err(ServiceError::from)?;

        Ok(MaterialFile { material, path })
    }

    /// Load a material enforcing the visibility rule: unapproved materials
    /// exist only for the channel owner and administrators.
    async fn load_visible(
        &self,
        material_id: Snowflake,
        caller_id: Snowflake,
    ) -> ServiceResult<(Material, User)> {
        let material = self.require_material(material_id).await?;
        let channel = self.require_channel(material.channel_id).await?;

        let permissions = PermissionService::new(self.ctx);
        let caller = permissions.require_user(caller_id).await?;

        let privileged = channel.is_owned_by(caller.id) || caller.is_administrator();
        if !privileged && (!material.is_approved() || !channel.is_approved()) {
            return Err(DomainError::MaterialNotFound(material_id).into());
        }

        Ok((material, caller))
    }

    async fn store_file(&self, owner: &User, file: &UploadedFile) -> ServiceResult<String> {
        self.ctx
            .storage()
            .save(
                FileKind::Material,
                owner.id.into_inner(),
                &file.file_name,
                &file.bytes,
            )
            .await
            .map_err(ServiceError::from)
    }

    async fn require_material(&self, material_id: Snowflake) -> ServiceResult<Material> {
        self.ctx
            .material_repo()
            .find_by_id(material_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::MaterialNotFound(material_id)))
    }

    async fn require_channel(&self, channel_id: Snowflake) -> ServiceResult<Channel> {
        self.ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::ChannelNotFound(channel_id)))
    }
}

fn validate_title(title: &str) -> ServiceResult<()> {
    if title.is_empty() || title.len() > 128 {
        return Err(ServiceError::validation("Title must be 1-128 characters"));
    }
    Ok(())
}
