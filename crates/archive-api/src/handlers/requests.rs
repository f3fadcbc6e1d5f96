//! Access request handlers
//!
//! Endpoints for private-channel access requests and their review.

use axum::{
    extract::{Path, State},
    Json,
};
use archive_service::{AccessRequestResponse, AccessRequestService};

use crate::extractors::AuthUser;
use crate::handlers::channels::parse_channel_id;
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Request access to a private channel
///
/// POST /channels/{channel_id}/requests
pub async fn create_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
) -> ApiResult<Created<Json<AccessRequestResponse>>> {
    let channel_id = parse_channel_id(&channel_id)?;

    let service = AccessRequestService::new(state.service_context());
    let response = service.request(channel_id, auth.user_id).await?;
    Ok(Created(Json(response)))
}

/// List a channel's pending requests (owner or administrator)
///
/// GET /channels/{channel_id}/requests
pub async fn list_pending_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
) -> ApiResult<Json<Vec<AccessRequestResponse>>> {
    let channel_id = parse_channel_id(&channel_id)?;

    let service = AccessRequestService::new(state.service_context());
    let response = service.list_pending(channel_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Approve a pending request (owner or administrator)
///
/// POST /requests/{request_id}/approve
pub async fn approve_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(request_id): Path<String>,
) -> ApiResult<NoContent> {
    let request_id = parse_request_id(&request_id)?;

    let service = AccessRequestService::new(state.service_context());
    service.approve(request_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Reject a pending request (owner or administrator)
///
/// POST /requests/{request_id}/reject
pub async fn reject_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(request_id): Path<String>,
) -> ApiResult<NoContent> {
    let request_id = parse_request_id(&request_id)?;

    let service = AccessRequestService::new(state.service_context());
    service.reject(request_id, auth.user_id).await?;
    Ok(NoContent)
}

fn parse_request_id(raw: &str) -> Result<archive_core::Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path("Invalid request_id format"))
}
