//! Request DTOs for API endpoints
//!
//! JSON request DTOs implement `Deserialize` and `Validate` for input
//! validation. Multipart endpoints (teacher registration, uploads) assemble
//! their request structs in the handler and the service runs validation.

use archive_core::entities::Visibility;
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

/// A file received from a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Size in bytes
    #[must_use]
    pub fn size(&self) -> i64 {
        self.bytes.len() as i64
    }
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Student registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 64, message = "Username must be 2-64 characters"))]
    pub username: String,

    #[validate(length(min = 1, max = 64, message = "First name must be 1-64 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 64, message = "Last name must be 1-64 characters"))]
    pub last_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(length(max = 128, message = "School must be at most 128 characters"))]
    pub school: Option<String>,

    #[validate(length(max = 16, message = "Gender must be at most 16 characters"))]
    pub gender: Option<String>,

    pub birth_date: Option<NaiveDate>,
}

/// Teacher registration: profile fields plus the mandatory proof document
///
/// Assembled from a multipart form by the handler.
#[derive(Debug, Clone)]
pub struct RegisterTeacherRequest {
    pub profile: RegisterRequest,
    pub proof_document: Option<UploadedFile>,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Authenticated password change request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub new_password: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update current user profile request
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 64, message = "Username must be 2-64 characters"))]
    pub username: Option<String>,

    #[validate(length(min = 1, max = 64, message = "First name must be 1-64 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 64, message = "Last name must be 1-64 characters"))]
    pub last_name: Option<String>,

    #[validate(length(max = 128, message = "School must be at most 128 characters"))]
    pub school: Option<String>,

    #[validate(length(max = 16, message = "Gender must be at most 16 characters"))]
    pub gender: Option<String>,

    pub birth_date: Option<NaiveDate>,
}

// ============================================================================
// Channel Requests
// ============================================================================

/// Create channel request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChannelRequest {
    #[validate(length(min = 1, max = 128, message = "Title must be 1-128 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub visibility: Visibility,
}

/// Update channel request
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateChannelRequest {
    #[validate(length(min = 1, max = 128, message = "Title must be 1-128 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    pub visibility: Option<Visibility>,
}

/// Join-by-access-code request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct JoinByCodeRequest {
    #[validate(length(min = 1, max = 16, message = "Access code must be 1-16 characters"))]
    pub code: String,
}

// ============================================================================
// Material Requests
// ============================================================================

/// Material upload: metadata plus the file, assembled from multipart
#[derive(Debug, Clone)]
pub struct CreateMaterialRequest {
    pub title: String,
    pub description: Option<String>,
    pub file: Option<UploadedFile>,
}

/// Material update; a new file sends the material back through moderation
#[derive(Debug, Clone, Default)]
pub struct UpdateMaterialRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub file: Option<UploadedFile>,
}

// ============================================================================
// Moderation Requests
// ============================================================================

/// Rejection of a channel or material; the reason is optional
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RejectRequest {
    pub reason: Option<String>,
}

/// Rejection of a teacher verification; the reason is mandatory
#[derive(Debug, Clone, Deserialize)]
pub struct RejectVerificationRequest {
    pub reason: String,
}

/// Soft deletion of a user; the reason is mandatory and replayed at login
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteUserRequest {
    pub reason: String,
}

/// Warning issued to a user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WarnUserRequest {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let request = RegisterRequest {
            username: "mshall".to_string(),
            first_name: "Mina".to_string(),
            last_name: "Shall".to_string(),
            email: "mina@example.com".to_string(),
            password: "SecurePass123".to_string(),
            school: None,
            gender: None,
            birth_date: None,
        };
        assert!(request.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..request.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_username = RegisterRequest {
            username: "x".to_string(),
            ..request
        };
        assert!(short_username.validate().is_err());
    }

    #[test]
    fn test_uploaded_file_size() {
        let file = UploadedFile {
            file_name: "notes.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![0; 512],
        };
        assert_eq!(file.size(), 512);
    }
}
