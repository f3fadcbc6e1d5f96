//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Student registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("student{suffix}"),
            first_name: "Test".to_string(),
            last_name: "Student".to_string(),
            email: format!("student{suffix}@example.com"),
            password: "TestPass123".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }

    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

/// Build a teacher registration multipart form with a proof document
pub fn teacher_registration_form() -> (Form, String) {
    let suffix = unique_suffix();
    let email = format!("teacher{suffix}@example.com");

    let form = Form::new()
        .text("username", format!("teacher{suffix}"))
        .text("first_name", "Test")
        .text("last_name", "Teacher")
        .text("email", email.clone())
        .text("password", "TestPass123")
        .part(
            "proof_document",
            Part::bytes(b"employment contract".to_vec())
                .file_name("contract.pdf")
                .mime_str("application/pdf")
                .expect("valid mime"),
        );

    (form, email)
}

/// Build a teacher registration form missing the proof document
pub fn teacher_registration_form_without_proof() -> Form {
    let suffix = unique_suffix();

    Form::new()
        .text("username", format!("teacher{suffix}"))
        .text("first_name", "Test")
        .text("last_name", "Teacher")
        .text("email", format!("teacher{suffix}@example.com"))
        .text("password", "TestPass123")
}

/// Build a material upload multipart form
pub fn material_upload_form(title: &str) -> Form {
    Form::new()
        .text("title", title.to_string())
        .text("description", "Uploaded by a test")
        .part(
            "file",
            Part::bytes(b"lecture notes content".to_vec())
                .file_name("notes.pdf")
                .mime_str("application/pdf")
                .expect("valid mime"),
        )
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Current user response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

/// Create channel request
#[derive(Debug, Serialize)]
pub struct CreateChannelRequest {
    pub title: String,
    pub description: Option<String>,
    pub visibility: String,
}

impl CreateChannelRequest {
    pub fn public() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Test Channel {suffix}"),
            description: Some("A test channel".to_string()),
            visibility: "public".to_string(),
        }
    }

    pub fn private() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Private Channel {suffix}"),
            description: Some("A private test channel".to_string()),
            visibility: "private".to_string(),
        }
    }
}

/// Channel response
#[derive(Debug, Deserialize)]
pub struct ChannelResponse {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub slug: String,
    pub visibility: String,
    pub status: String,
    pub subscriber_count: i64,
    pub access_code: Option<String>,
}

/// Join response
#[derive(Debug, Deserialize)]
pub struct JoinResponse {
    pub channel: ChannelResponse,
    pub newly_joined: bool,
}

/// Access request response
#[derive(Debug, Deserialize)]
pub struct AccessRequestResponse {
    pub id: String,
    pub channel_id: String,
    pub user_id: String,
    pub status: String,
}

/// Material response
#[derive(Debug, Deserialize)]
pub struct MaterialResponse {
    pub id: String,
    pub channel_id: String,
    pub title: String,
    pub file_name: String,
    pub mime_type: String,
    pub status: String,
}

/// Verification response
#[derive(Debug, Deserialize)]
pub struct VerificationResponse {
    pub id: String,
    pub user_id: String,
    pub status: String,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
