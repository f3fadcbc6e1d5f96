//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance with the schema applied
//! - Environment variables: DATABASE_URL, API_PORT, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, seed_admin, TestServer,
};
use reqwest::StatusCode;

/// Register a student and return (auth, registration data)
async fn register_student(server: &TestServer) -> (AuthResponse, RegisterRequest) {
    let request = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let auth = assert_json(response, StatusCode::CREATED).await.unwrap();
    (auth, request)
}

/// Register a teacher, have a seeded admin approve the verification, and
/// return a token carrying the promoted role
async fn register_approved_teacher(server: &TestServer) -> (AuthResponse, String) {
    let (form, email) = teacher_registration_form();
    let response = server
        .post_multipart("/api/v1/auth/register/teacher", None, form)
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(auth.user.role, "teacher_pending");

    let admin_token = admin_token(server).await;

    // Find this teacher's verification in the pending queue
    let response = server
        .get_auth("/api/v1/admin/verifications/pending", &admin_token)
        .await
        .unwrap();
    let pending: Vec<VerificationResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let verification = pending
        .iter()
        .find(|v| v.user_id == auth.user.id)
        .expect("verification queued");

    let response = server
        .post_auth_empty(
            &format!("/api/v1/admin/verifications/{}/approve", verification.id),
            &admin_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Log in again to pick up the promoted role
    let response = server
        .post("/api/v1/auth/login", &LoginRequest::new(&email, "TestPass123"))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.role, "teacher");

    (auth, email)
}

/// Seed an administrator and log in
async fn admin_token(server: &TestServer) -> String {
    let (email, password) = seed_admin().await.expect("seed admin");
    let response = server
        .post("/api/v1/auth/login", &LoginRequest::new(&email, &password))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    auth.access_token
}

/// Create a channel as the given teacher and approve it as admin
async fn approved_channel(
    server: &TestServer,
    teacher_token: &str,
    admin_token: &str,
    request: &CreateChannelRequest,
) -> ChannelResponse {
    let response = server
        .post_auth("/api/v1/channels", teacher_token, request)
        .await
        .unwrap();
    let channel: ChannelResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(channel.status, "pending");

    let response = server
        .post_auth_empty(
            &format!("/api/v1/admin/channels/{}/approve", channel.id),
            admin_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    channel
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_student() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.username, request.username);
    assert_eq!(auth.user.role, "student");
    assert_eq!(auth.token_type, "Bearer");
    assert!(!auth.access_token.is_empty());
    assert!(auth.expires_in > 0);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    // First registration
    server.post("/api/v1/auth/register", &request).await.unwrap();

    // Second registration with same email
    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_weak_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.password = "alllowercase".to_string();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login_and_me() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, request) = register_student(&server).await;

    let response = server
        .post("/api/v1/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth("/api/v1/users/@me", &auth.access_token)
        .await
        .unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.email, request.email);
}

#[tokio::test]
async fn test_login_wrong_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, request) = register_student(&server).await;

    let response = server
        .post(
            "/api/v1/auth/login",
            &LoginRequest::new(&request.email, "WrongPass123"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/users/@me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Teacher Registration & Verification Tests
// ============================================================================

#[tokio::test]
async fn test_teacher_registration_requires_proof() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = teacher_registration_form_without_proof();

    let response = server
        .post_multipart("/api/v1/auth/register/teacher", None, form)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_teacher_approval_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // register_approved_teacher asserts the full scenario:
    // pending role at registration, pending verification in the admin queue,
    // promotion on approval, teacher role on the next login.
    let (auth, _) = register_approved_teacher(&server).await;
    assert_eq!(auth.user.role, "teacher");
}

#[tokio::test]
async fn test_verification_reject_requires_reason() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (form, email) = teacher_registration_form();
    let response = server
        .post_multipart("/api/v1/auth/register/teacher", None, form)
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let admin_token = admin_token(&server).await;

    let response = server
        .get_auth("/api/v1/admin/verifications/pending", &admin_token)
        .await
        .unwrap();
    let pending: Vec<VerificationResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let verification = pending
        .iter()
        .find(|v| v.user_id == auth.user.id)
        .expect("verification queued");

    // Empty reason is refused
    let response = server
        .post_auth(
            &format!("/api/v1/admin/verifications/{}/reject", verification.id),
            &admin_token,
            &serde_json::json!({ "reason": "  " }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // A real reason succeeds and the role stays teacher_pending
    let response = server
        .post_auth(
            &format!("/api/v1/admin/verifications/{}/reject", verification.id),
            &admin_token,
            &serde_json::json!({ "reason": "document unreadable" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .post("/api/v1/auth/login", &LoginRequest::new(&email, "TestPass123"))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.role, "teacher_pending");
}

#[tokio::test]
async fn test_pending_teacher_cannot_create_channel() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (form, _) = teacher_registration_form();
    let response = server
        .post_multipart("/api/v1/auth/register/teacher", None, form)
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/channels",
            &auth.access_token,
            &CreateChannelRequest::public(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Channel Moderation & Discovery Tests
// ============================================================================

#[tokio::test]
async fn test_pending_channel_hidden_from_students() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (teacher, _) = register_approved_teacher(&server).await;
    let (student, _) = register_student(&server).await;

    let request = CreateChannelRequest::public();
    let response = server
        .post_auth("/api/v1/channels", &teacher.access_token, &request)
        .await
        .unwrap();
    let channel: ChannelResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Not in search results
    let response = server
        .get_auth("/api/v1/channels", &student.access_token)
        .await
        .unwrap();
    let found: Vec<ChannelResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!found.iter().any(|c| c.id == channel.id));

    // Direct fetch by a student is a 404, not a 403
    let response = server
        .get_auth(
            &format!("/api/v1/channels/{}", channel.id),
            &student.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // The owner still sees it, with the access code
    let response = server
        .get_auth(
            &format!("/api/v1/channels/{}", channel.id),
            &teacher.access_token,
        )
        .await
        .unwrap();
    let owned: ChannelResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(owned.status, "pending");
    assert!(owned.access_code.is_some());
}

#[tokio::test]
async fn test_join_public_channel_idempotent() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (teacher, _) = register_approved_teacher(&server).await;
    let admin = admin_token(&server).await;
    let (student, _) = register_student(&server).await;

    let channel = approved_channel(
        &server,
        &teacher.access_token,
        &admin,
        &CreateChannelRequest::public(),
    )
    .await;

    // First join
    let response = server
        .post_auth_empty(
            &format!("/api/v1/channels/{}/join", channel.id),
            &student.access_token,
        )
        .await
        .unwrap();
    let join: JoinResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(join.newly_joined);

    // Second join is a no-op success
    let response = server
        .post_auth_empty(
            &format!("/api/v1/channels/{}/join", channel.id),
            &student.access_token,
        )
        .await
        .unwrap();
    let join: JoinResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!join.newly_joined);

    // Exactly one increment across both joins
    let response = server
        .get_auth(
            &format!("/api/v1/channels/{}", channel.id),
            &teacher.access_token,
        )
        .await
        .unwrap();
    let fetched: ChannelResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.subscriber_count, 1);

    // Leave, then the counter is back at zero
    let response = server
        .delete_auth(
            &format!("/api/v1/channels/{}/members/@me", channel.id),
            &student.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Leaving again fails and does not touch the counter
    let response = server
        .delete_auth(
            &format!("/api/v1/channels/{}/members/@me", channel.id),
            &student.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/channels/{}", channel.id),
            &teacher.access_token,
        )
        .await
        .unwrap();
    let fetched: ChannelResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.subscriber_count, 0);
}

#[tokio::test]
async fn test_join_by_access_code() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (teacher, _) = register_approved_teacher(&server).await;
    let admin = admin_token(&server).await;
    let (student, _) = register_student(&server).await;

    let channel = approved_channel(
        &server,
        &teacher.access_token,
        &admin,
        &CreateChannelRequest::private(),
    )
    .await;
    let code = channel.access_code.expect("owner sees the code");

    let response = server
        .post_auth(
            "/api/v1/channels/join",
            &student.access_token,
            &serde_json::json!({ "code": code }),
        )
        .await
        .unwrap();
    let join: JoinResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(join.newly_joined);
    assert_eq!(join.channel.id, channel.id);

    // An unknown code is a 404
    let response = server
        .post_auth(
            "/api/v1/channels/join",
            &student.access_token,
            &serde_json::json!({ "code": "nope1234" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Access Request Tests
// ============================================================================

#[tokio::test]
async fn test_private_channel_access_request_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (teacher, _) = register_approved_teacher(&server).await;
    let admin = admin_token(&server).await;
    let (student, _) = register_student(&server).await;

    let channel = approved_channel(
        &server,
        &teacher.access_token,
        &admin,
        &CreateChannelRequest::private(),
    )
    .await;

    // Public join is refused for a private channel
    let response = server
        .post_auth_empty(
            &format!("/api/v1/channels/{}/join", channel.id),
            &student.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Request access
    let response = server
        .post_auth_empty(
            &format!("/api/v1/channels/{}/requests", channel.id),
            &student.access_token,
        )
        .await
        .unwrap();
    let request: AccessRequestResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(request.status, "pending");

    // A duplicate pending request is a conflict
    let response = server
        .post_auth_empty(
            &format!("/api/v1/channels/{}/requests", channel.id),
            &student.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // The owner sees exactly this pending request
    let response = server
        .get_auth(
            &format!("/api/v1/channels/{}/requests", channel.id),
            &teacher.access_token,
        )
        .await
        .unwrap();
    let pending: Vec<AccessRequestResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(pending.iter().any(|r| r.id == request.id));

    // Approve: membership appears and the counter moved exactly once
    let response = server
        .post_auth_empty(
            &format!("/api/v1/requests/{}/approve", request.id),
            &teacher.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth("/api/v1/users/@me/channels", &student.access_token)
        .await
        .unwrap();
    let joined: Vec<ChannelResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(joined.iter().any(|c| c.id == channel.id));

    let response = server
        .get_auth(
            &format!("/api/v1/channels/{}", channel.id),
            &teacher.access_token,
        )
        .await
        .unwrap();
    let fetched: ChannelResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.subscriber_count, 1);

    // Approving a settled request is a conflict
    let response = server
        .post_auth_empty(
            &format!("/api/v1/requests/{}/approve", request.id),
            &teacher.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_rejected_request_allows_re_request() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (teacher, _) = register_approved_teacher(&server).await;
    let admin = admin_token(&server).await;
    let (student, _) = register_student(&server).await;

    let channel = approved_channel(
        &server,
        &teacher.access_token,
        &admin,
        &CreateChannelRequest::private(),
    )
    .await;

    let response = server
        .post_auth_empty(
            &format!("/api/v1/channels/{}/requests", channel.id),
            &student.access_token,
        )
        .await
        .unwrap();
    let request: AccessRequestResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth_empty(
            &format!("/api/v1/requests/{}/reject", request.id),
            &teacher.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Rejection does not lock the student out
    let response = server
        .post_auth_empty(
            &format!("/api/v1/channels/{}/requests", channel.id),
            &student.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

// ============================================================================
// Material Tests
// ============================================================================

#[tokio::test]
async fn test_material_upload_moderation_and_download() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (teacher, _) = register_approved_teacher(&server).await;
    let admin = admin_token(&server).await;
    let (student, _) = register_student(&server).await;

    let channel = approved_channel(
        &server,
        &teacher.access_token,
        &admin,
        &CreateChannelRequest::public(),
    )
    .await;

    // A student cannot upload
    let response = server
        .post_multipart(
            &format!("/api/v1/channels/{}/materials", channel.id),
            Some(&student.access_token),
            material_upload_form("Student upload"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // The owner uploads; the material is pending
    let response = server
        .post_multipart(
            &format!("/api/v1/channels/{}/materials", channel.id),
            Some(&teacher.access_token),
            material_upload_form("Week 1 notes"),
        )
        .await
        .unwrap();
    let material: MaterialResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(material.status, "pending");

    // Students don't see pending materials
    let response = server
        .get_auth(
            &format!("/api/v1/channels/{}/materials", channel.id),
            &student.access_token,
        )
        .await
        .unwrap();
    let visible: Vec<MaterialResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(visible.is_empty());

    // Pending materials can't be downloaded by students either
    let response = server
        .get_auth(
            &format!("/api/v1/materials/{}/download", material.id),
            &student.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Admin approves
    let response = server
        .post_auth_empty(
            &format!("/api/v1/admin/materials/{}/approve", material.id),
            &admin,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Now listed and downloadable
    let response = server
        .get_auth(
            &format!("/api/v1/channels/{}/materials", channel.id),
            &student.access_token,
        )
        .await
        .unwrap();
    let visible: Vec<MaterialResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].status, "approved");

    let response = server
        .get_auth(
            &format!("/api/v1/materials/{}/download", material.id),
            &student.access_token,
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.bytes().await.unwrap();
    assert_eq!(&body[..], b"lecture notes content");

    // The download shows up in the admin history
    let response = server
        .get_auth("/api/v1/admin/downloads", &admin)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// User Administration Tests
// ============================================================================

#[tokio::test]
async fn test_soft_deleted_user_login_carries_reason() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (student, registration) = register_student(&server).await;
    let admin = admin_token(&server).await;

    // Deleting without a reason is refused
    let response = server
        .delete_auth_json(
            &format!("/api/v1/admin/users/{}", student.user.id),
            &admin,
            &serde_json::json!({ "reason": "" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .delete_auth_json(
            &format!("/api/v1/admin/users/{}", student.user.id),
            &admin,
            &serde_json::json!({ "reason": "repeated policy violations" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Login fails with the stored reason in the message
    let response = server
        .post(
            "/api/v1/auth/login",
            &LoginRequest::from_register(&registration),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error.code, "ACCOUNT_DEACTIVATED");
    assert!(body.error.message.contains("repeated policy violations"));
}

#[tokio::test]
async fn test_warnings_accumulate() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (student, _) = register_student(&server).await;
    let admin = admin_token(&server).await;

    for message in ["first warning", "second warning"] {
        let response = server
            .post_auth(
                &format!("/api/v1/admin/users/{}/warnings", student.user.id),
                &admin,
                &serde_json::json!({ "message": message }),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .get_auth(
            &format!("/api/v1/admin/users/{}/warnings", student.user.id),
            &admin,
        )
        .await
        .unwrap();
    let warnings: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0]["message"], "first warning");
}

#[tokio::test]
async fn test_admin_routes_reject_students() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (student, _) = register_student(&server).await;

    let response = server
        .get_auth("/api/v1/admin/channels/pending", &student.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .get_auth("/api/v1/admin/reports", &student.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_admin_report_shape() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await;

    let response = server.get_auth("/api/v1/admin/reports", &admin).await.unwrap();
    let report: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(report["administrators"].as_i64().unwrap_or(0) >= 1);
    assert!(report["channels"]["approved"].is_i64());
    assert!(report["materials"]["pending"].is_i64());
    assert!(report["total_memberships"].is_i64());
    assert!(report["total_downloads"].is_i64());
}
