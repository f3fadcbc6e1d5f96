//! Material handlers
//!
//! Endpoints for material upload, metadata, content replacement, and the
//! download/preview streams.

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, HeaderValue},
    response::Response,
    Json,
};
use archive_service::{
    CreateMaterialRequest, MaterialFile, MaterialResponse, MaterialService, UpdateMaterialRequest,
};
use tokio_util::io::ReaderStream;

use crate::extractors::{read_file_field, read_text_field, AuthUser};
use crate::handlers::channels::parse_channel_id;
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Upload a material to a channel (multipart; owning teacher only)
///
/// POST /channels/{channel_id}/materials
pub async fn upload_material(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Created<Json<MaterialResponse>>> {
    let channel_id = parse_channel_id(&channel_id)?;
    let request = parse_material_form(multipart).await?;

    let service = MaterialService::new(state.service_context());
    let response = service.upload(channel_id, auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// List a channel's materials (approved-only for non-privileged viewers)
///
/// GET /channels/{channel_id}/materials
pub async fn list_materials(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
) -> ApiResult<Json<Vec<MaterialResponse>>> {
    let channel_id = parse_channel_id(&channel_id)?;

    let service = MaterialService::new(state.service_context());
    let response = service.list(channel_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Get a material's metadata
///
/// GET /materials/{material_id}
pub async fn get_material(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(material_id): Path<String>,
) -> ApiResult<Json<MaterialResponse>> {
    let material_id = parse_material_id(&material_id)?;

    let service = MaterialService::new(state.service_context());
    let response = service.get(material_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Update a material; a new file resets moderation (multipart; owner only)
///
/// PATCH /materials/{material_id}
pub async fn update_material(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(material_id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Json<MaterialResponse>> {
    let material_id = parse_material_id(&material_id)?;
    let request = parse_material_update_form(multipart).await?;

    let service = MaterialService::new(state.service_context());
    let response = service.update(material_id, auth.user_id, request).await?;
    Ok(Json(response))
}

/// Download a material as an attachment (logs a download event)
///
/// GET /materials/{material_id}/download
pub async fn download_material(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(material_id): Path<String>,
) -> ApiResult<Response> {
    let material_id = parse_material_id(&material_id)?;

    let service = MaterialService::new(state.service_context());
    let resolved = service.download(material_id, auth.user_id).await?;

    stream_file(resolved, "attachment").await
}

/// Preview a material inline
///
/// GET /materials/{material_id}/preview
pub async fn preview_material(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(material_id): Path<String>,
) -> ApiResult<Response> {
    let material_id = parse_material_id(&material_id)?;

    let service = MaterialService::new(state.service_context());
    let resolved = service.preview(material_id, auth.user_id).await?;

    stream_file(resolved, "inline").await
}

/// Build a streaming file response from a resolved material
async fn stream_file(resolved: MaterialFile, disposition: &str) -> ApiResult<Response> {
    let material = resolved.material;
    let path = resolved.path;

    let file = tokio::fs::File::open(&path).await.map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Stored file missing");
        ApiError::internal(e)
    })?;
    let stream = ReaderStream::new(file);

    // Quotes in the original filename would break the header
    let safe_name: String = material
        .file_name
        .chars()
        .filter(|c| *c != '"' && *c != '\r' && *c != '\n')
        .collect();

    let response = Response::builder()
        .header(
            header::CONTENT_TYPE,
            HeaderValue::from_str(&material.mime_type)
                .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
        )
        .header(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_str(&format!("{disposition}; filename=\"{safe_name}\""))
                .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
        )
        .header(header::CONTENT_LENGTH, material.file_size)
        .body(Body::from_stream(stream))
        .map_err(ApiError::internal)?;

    Ok(response)
}

/// Assemble a material upload from its multipart form
async fn parse_material_form(mut multipart: Multipart) -> Result<CreateMaterialRequest, ApiError> {
    let mut title = String::new();
    let mut description = None;
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_multipart(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => title = read_text_field(field).await?,
            "description" => description = Some(read_text_field(field).await?),
            "file" => file = Some(read_file_field(field).await?),
            _ => {}
        }
    }

    Ok(CreateMaterialRequest {
        title,
        description,
        file,
    })
}

/// Assemble a material update from its multipart form
async fn parse_material_update_form(
    mut multipart: Multipart,
) -> Result<UpdateMaterialRequest, ApiError> {
    let mut request = UpdateMaterialRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_multipart(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => request.title = Some(read_text_field(field).await?),
            "description" => request.description = Some(read_text_field(field).await?),
            "file" => request.file = Some(read_file_field(field).await?),
            _ => {}
        }
    }

    Ok(request)
}

fn parse_material_id(raw: &str) -> Result<archive_core::Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path("Invalid material_id format"))
}
