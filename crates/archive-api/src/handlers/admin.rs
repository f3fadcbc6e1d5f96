//! Administrator handlers
//!
//! Moderation queues and actions, user administration, reports, and
//! maintenance. Every endpoint requires the administrator role, enforced in
//! the moderation service against the persisted role.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use archive_service::{
    ChannelResponse, DeleteUserRequest, DownloadEntryResponse, MaterialResponse, ModerationService,
    OrphanCleanupResponse, RejectRequest, RejectVerificationRequest, ReportResponse, UserResponse,
    VerificationResponse, WarnUserRequest, WarningResponse,
};
use serde::Deserialize;

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

// ============================================================================
// Channel moderation
// ============================================================================

/// List channels awaiting moderation
///
/// GET /admin/channels/pending
pub async fn pending_channels(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ChannelResponse>>> {
    let service = ModerationService::new(state.service_context());
    let response = service.pending_channels(auth.user_id).await?;
    Ok(Json(response))
}

/// Approve a channel
///
/// POST /admin/channels/{channel_id}/approve
pub async fn approve_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
) -> ApiResult<NoContent> {
    let channel_id = parse_id(&channel_id, "channel_id")?;

    let service = ModerationService::new(state.service_context());
    service.approve_channel(channel_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Reject a channel (reason optional)
///
/// POST /admin/channels/{channel_id}/reject
pub async fn reject_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
    body: Option<Json<RejectRequest>>,
) -> ApiResult<NoContent> {
    let channel_id = parse_id(&channel_id, "channel_id")?;
    let request = body.map(|b| b.0).unwrap_or_default();

    let service = ModerationService::new(state.service_context());
    service
        .reject_channel(channel_id, auth.user_id, request)
        .await?;
    Ok(NoContent)
}

// ============================================================================
// Material moderation
// ============================================================================

/// List materials awaiting moderation
///
/// GET /admin/materials/pending
pub async fn pending_materials(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<MaterialResponse>>> {
    let service = ModerationService::new(state.service_context());
    let response = service.pending_materials(auth.user_id).await?;
    Ok(Json(response))
}

/// Approve a material
///
/// POST /admin/materials/{material_id}/approve
pub async fn approve_material(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(material_id): Path<String>,
) -> ApiResult<NoContent> {
    let material_id = parse_id(&material_id, "material_id")?;

    let service = ModerationService::new(state.service_context());
    service.approve_material(material_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Reject a material (reason optional)
///
/// POST /admin/materials/{material_id}/reject
pub async fn reject_material(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(material_id): Path<String>,
    body: Option<Json<RejectRequest>>,
) -> ApiResult<NoContent> {
    let material_id = parse_id(&material_id, "material_id")?;
    let request = body.map(|b| b.0).unwrap_or_default();

    let service = ModerationService::new(state.service_context());
    service
        .reject_material(material_id, auth.user_id, request)
        .await?;
    Ok(NoContent)
}

// ============================================================================
// Teacher verification
// ============================================================================

/// List teacher verifications awaiting review
///
/// GET /admin/verifications/pending
pub async fn pending_verifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<VerificationResponse>>> {
    let service = ModerationService::new(state.service_context());
    let response = service.pending_verifications(auth.user_id).await?;
    Ok(Json(response))
}

/// Approve a verification, promoting the teacher
///
/// POST /admin/verifications/{verification_id}/approve
pub async fn approve_verification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(verification_id): Path<String>,
) -> ApiResult<NoContent> {
    let verification_id = parse_id(&verification_id, "verification_id")?;

    let service = ModerationService::new(state.service_context());
    service
        .approve_verification(verification_id, auth.user_id)
        .await?;
    Ok(NoContent)
}

/// Reject a verification (non-empty reason required)
///
/// POST /admin/verifications/{verification_id}/reject
pub async fn reject_verification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(verification_id): Path<String>,
    Json(request): Json<RejectVerificationRequest>,
) -> ApiResult<NoContent> {
    let verification_id = parse_id(&verification_id, "verification_id")?;

    let service = ModerationService::new(state.service_context());
    service
        .reject_verification(verification_id, auth.user_id, request)
        .await?;
    Ok(NoContent)
}

// ============================================================================
// User administration
// ============================================================================

/// List active users
///
/// GET /admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = ModerationService::new(state.service_context());
    let response = service
        .list_users(auth.user_id, pagination.limit, pagination.offset)
        .await?;
    Ok(Json(response))
}

/// Soft-delete a user (non-empty reason required)
///
/// DELETE /admin/users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
    Json(request): Json<DeleteUserRequest>,
) -> ApiResult<NoContent> {
    let user_id = parse_id(&user_id, "user_id")?;

    let service = ModerationService::new(state.service_context());
    service.delete_user(user_id, auth.user_id, request).await?;
    Ok(NoContent)
}

/// Issue a warning to a user
///
/// POST /admin/users/{user_id}/warnings
pub async fn warn_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
    ValidatedJson(request): ValidatedJson<WarnUserRequest>,
) -> ApiResult<Created<Json<WarningResponse>>> {
    let user_id = parse_id(&user_id, "user_id")?;

    let service = ModerationService::new(state.service_context());
    let response = service.warn_user(user_id, auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// List a user's warnings
///
/// GET /admin/users/{user_id}/warnings
pub async fn user_warnings(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<WarningResponse>>> {
    let user_id = parse_id(&user_id, "user_id")?;

    let service = ModerationService::new(state.service_context());
    let response = service.user_warnings(user_id, auth.user_id).await?;
    Ok(Json(response))
}

// ============================================================================
// Reports & maintenance
// ============================================================================

/// Aggregate platform report
///
/// GET /admin/reports
pub async fn report(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ReportResponse>> {
    let service = ModerationService::new(state.service_context());
    let response = service.report(auth.user_id).await?;
    Ok(Json(response))
}

/// Download history query parameters
#[derive(Debug, Deserialize)]
pub struct DownloadHistoryParams {
    pub limit: Option<i64>,
}

/// Recent download history
///
/// GET /admin/downloads
pub async fn download_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DownloadHistoryParams>,
) -> ApiResult<Json<Vec<DownloadEntryResponse>>> {
    let service = ModerationService::new(state.service_context());
    let response = service
        .download_history(auth.user_id, params.limit.unwrap_or(100))
        .await?;
    Ok(Json(response))
}

/// Sweep materials orphaned by channel deletion
///
/// POST /admin/maintenance/orphans
pub async fn cleanup_orphans(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<OrphanCleanupResponse>> {
    let service = ModerationService::new(state.service_context());
    let response = service.cleanup_orphans(auth.user_id).await?;
    Ok(Json(response))
}

fn parse_id(raw: &str, what: &str) -> Result<archive_core::Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {what} format")))
}
