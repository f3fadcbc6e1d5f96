//! Channel handlers
//!
//! Endpoints for channel CRUD, discovery, join/leave, and the member list.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use archive_service::{
    ChannelResponse, ChannelService, CreateChannelRequest, JoinByCodeRequest, JoinResponse,
    MemberResponse, MembershipService, UpdateChannelRequest,
};
use serde::Deserialize;

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Channel search query parameters
#[derive(Debug, Deserialize)]
pub struct ChannelSearchParams {
    /// Title substring filter
    pub q: Option<String>,
}

/// Search approved channels
///
/// GET /channels
pub async fn search_channels(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<ChannelSearchParams>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<ChannelResponse>>> {
    let service = ChannelService::new(state.service_context());
    let response = service
        .search(params.q.as_deref(), pagination.limit, pagination.offset)
        .await?;
    Ok(Json(response))
}

/// Create a channel (teachers only)
///
/// POST /channels
pub async fn create_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateChannelRequest>,
) -> ApiResult<Created<Json<ChannelResponse>>> {
    let service = ChannelService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// List the caller's own channels (all statuses)
///
/// GET /channels/mine
pub async fn my_channels(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ChannelResponse>>> {
    let service = ChannelService::new(state.service_context());
    let response = service.my_channels(auth.user_id).await?;
    Ok(Json(response))
}

/// Join a channel by access code
///
/// POST /channels/join
pub async fn join_by_code(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<JoinByCodeRequest>,
) -> ApiResult<Json<JoinResponse>> {
    let service = MembershipService::new(state.service_context());
    let response = service.join_by_code(auth.user_id, &request.code).await?;
    Ok(Json(response))
}

/// Get a channel
///
/// GET /channels/{channel_id}
pub async fn get_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
) -> ApiResult<Json<ChannelResponse>> {
    let channel_id = parse_channel_id(&channel_id)?;

    let service = ChannelService::new(state.service_context());
    let response = service.get(channel_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Update a channel (owner only)
///
/// PATCH /channels/{channel_id}
pub async fn update_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateChannelRequest>,
) -> ApiResult<Json<ChannelResponse>> {
    let channel_id = parse_channel_id(&channel_id)?;

    let service = ChannelService::new(state.service_context());
    let response = service.update(channel_id, auth.user_id, request).await?;
    Ok(Json(response))
}

/// Soft-delete a channel (owner or administrator)
///
/// DELETE /channels/{channel_id}
pub async fn delete_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
) -> ApiResult<NoContent> {
    let channel_id = parse_channel_id(&channel_id)?;

    let service = ChannelService::new(state.service_context());
    service.delete(channel_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Join a public channel
///
/// POST /channels/{channel_id}/join
pub async fn join_public(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
) -> ApiResult<Json<JoinResponse>> {
    let channel_id = parse_channel_id(&channel_id)?;

    let service = MembershipService::new(state.service_context());
    let response = service.join_public(channel_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Leave a channel
///
/// DELETE /channels/{channel_id}/members/@me
pub async fn leave_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
) -> ApiResult<NoContent> {
    let channel_id = parse_channel_id(&channel_id)?;

    let service = MembershipService::new(state.service_context());
    service.leave(channel_id, auth.user_id).await?;
    Ok(NoContent)
}

/// List channel members (owning teacher only)
///
/// GET /channels/{channel_id}/members
pub async fn get_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
) -> ApiResult<Json<Vec<MemberResponse>>> {
    let channel_id = parse_channel_id(&channel_id)?;

    let service = ChannelService::new(state.service_context());
    let response = service.members(channel_id, auth.user_id).await?;
    Ok(Json(response))
}

pub(crate) fn parse_channel_id(raw: &str) -> Result<archive_core::Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path("Invalid channel_id format"))
}
