//! Authentication handlers
//!
//! Endpoints for registration, login, and password changes. Teacher
//! registration is multipart because it carries the proof document.

use axum::{
    extract::{Multipart, State},
    Json,
};
use archive_service::{
    AuthResponse, AuthService, ChangePasswordRequest, LoginRequest, RegisterRequest,
    RegisterTeacherRequest,
};
use chrono::NaiveDate;

use crate::extractors::{read_file_field, read_text_field, AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new student account
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Register a new teacher account (multipart, proof document required)
///
/// POST /auth/register/teacher
pub async fn register_teacher(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let request = parse_teacher_form(multipart).await?;

    let service = AuthService::new(state.service_context());
    let response = service.register_teacher(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Change the current user's password
///
/// PUT /auth/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<NoContent> {
    let service = AuthService::new(state.service_context());
    service.change_password(auth.user_id, request).await?;
    Ok(NoContent)
}

/// Assemble a teacher registration from its multipart form
async fn parse_teacher_form(mut multipart: Multipart) -> Result<RegisterTeacherRequest, ApiError> {
    let mut username = String::new();
    let mut first_name = String::new();
    let mut last_name = String::new();
    let mut email = String::new();
    let mut password = String::new();
    let mut school = None;
    let mut gender = None;
    let mut birth_date = None;
    let mut proof_document = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_multipart(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "username" => username = read_text_field(field).await?,
            "first_name" => first_name = read_text_field(field).await?,
            "last_name" => last_name = read_text_field(field).await?,
            "email" => email = read_text_field(field).await?,
            "password" => password = read_text_field(field).await?,
            "school" => school = Some(read_text_field(field).await?),
            "gender" => gender = Some(read_text_field(field).await?),
            "birth_date" => {
                let text = read_text_field(field).await?;
                birth_date = Some(
                    text.parse::<NaiveDate>()
                        .map_err(|_| ApiError::invalid_multipart("Invalid birth_date format"))?,
                );
            }
            "proof_document" => proof_document = Some(read_file_field(field).await?),
            // Unknown fields are ignored
            _ => {}
        }
    }

    Ok(RegisterTeacherRequest {
        profile: RegisterRequest {
            username,
            first_name,
            last_name,
            email,
            password,
            school,
            gender,
            birth_date,
        },
        proof_document,
    })
}
