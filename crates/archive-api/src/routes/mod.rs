//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{admin, auth, channels, health, materials, requests, users};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(channel_routes())
        .merge(material_routes())
        .merge(request_routes())
        .merge(admin_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/register/teacher", post(auth::register_teacher))
        .route("/auth/login", post(auth::login))
        .route("/auth/password", put(auth::change_password))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(users::get_current_user))
        .route("/users/@me", patch(users::update_current_user))
        .route("/users/@me/avatar", put(users::set_avatar))
        .route("/users/@me/channels", get(users::get_joined_channels))
}

/// Channel routes
fn channel_routes() -> Router<AppState> {
    Router::new()
        // Channel discovery and CRUD
        .route("/channels", get(channels::search_channels))
        .route("/channels", post(channels::create_channel))
        .route("/channels/mine", get(channels::my_channels))
        .route("/channels/join", post(channels::join_by_code))
        .route("/channels/:channel_id", get(channels::get_channel))
        .route("/channels/:channel_id", patch(channels::update_channel))
        .route("/channels/:channel_id", delete(channels::delete_channel))
        // Membership
        .route("/channels/:channel_id/join", post(channels::join_public))
        .route("/channels/:channel_id/members/@me", delete(channels::leave_channel))
        .route("/channels/:channel_id/members", get(channels::get_members))
}

/// Material routes
fn material_routes() -> Router<AppState> {
    Router::new()
        .route("/channels/:channel_id/materials", get(materials::list_materials))
        .route("/channels/:channel_id/materials", post(materials::upload_material))
        .route("/materials/:material_id", get(materials::get_material))
        .route("/materials/:material_id", patch(materials::update_material))
        .route("/materials/:material_id/download", get(materials::download_material))
        .route("/materials/:material_id/preview", get(materials::preview_material))
}

/// Access request routes
fn request_routes() -> Router<AppState> {
    Router::new()
        .route("/channels/:channel_id/requests", post(requests::create_request))
        .route("/channels/:channel_id/requests", get(requests::list_pending_requests))
        .route("/requests/:request_id/approve", post(requests::approve_request))
        .route("/requests/:request_id/reject", post(requests::reject_request))
}

/// Administrator routes
fn admin_routes() -> Router<AppState> {
    Router::new()
        // Moderation queues and actions
        .route("/admin/channels/pending", get(admin::pending_channels))
        .route("/admin/channels/:channel_id/approve", post(admin::approve_channel))
        .route("/admin/channels/:channel_id/reject", post(admin::reject_channel))
        .route("/admin/materials/pending", get(admin::pending_materials))
        .route("/admin/materials/:material_id/approve", post(admin::approve_material))
        .route("/admin/materials/:material_id/reject", post(admin::reject_material))
        .route("/admin/verifications/pending", get(admin::pending_verifications))
        .route(
            "/admin/verifications/:verification_id/approve",
            post(admin::approve_verification),
        )
        .route(
            "/admin/verifications/:verification_id/reject",
            post(admin::reject_verification),
        )
        // User administration
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/:user_id", delete(admin::delete_user))
        .route("/admin/users/:user_id/warnings", post(admin::warn_user))
        .route("/admin/users/:user_id/warnings", get(admin::user_warnings))
        // Reports & maintenance
        .route("/admin/reports", get(admin::report))
        .route("/admin/downloads", get(admin::download_history))
        .route("/admin/maintenance/orphans", post(admin::cleanup_orphans))
}
