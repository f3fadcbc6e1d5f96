//! User profile handlers
//!
//! Endpoints for the current user's profile, avatar, and joined channels.

use axum::{
    extract::{Multipart, State},
    Json,
};
use archive_service::{ChannelResponse, CurrentUserResponse, UpdateProfileRequest, UserService};

use crate::extractors::{read_file_field, AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Get the current user's profile
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.me(auth.user_id).await?;
    Ok(Json(response))
}

/// Update the current user's profile
///
/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_profile(auth.user_id, request).await?;
    Ok(Json(response))
}

/// Replace the current user's profile image (multipart)
///
/// PUT /users/@me/avatar
pub async fn set_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<CurrentUserResponse>> {
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_multipart(e.to_string()))?
    {
        if field.name() == Some("image") {
            file = Some(read_file_field(field).await?);
        }
    }

    let service = UserService::new(state.service_context());
    let response = service.set_avatar(auth.user_id, file).await?;
    Ok(Json(response))
}

/// List the channels the current user has joined
///
/// GET /users/@me/channels
pub async fn get_joined_channels(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ChannelResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.joined_channels(auth.user_id).await?;
    Ok(Json(response))
}
