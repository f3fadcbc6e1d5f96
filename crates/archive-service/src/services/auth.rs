//! Authentication service
//!
//! Handles student/teacher registration, login, and password changes.

use archive_common::auth::{hash_password, validate_password_strength, verify_password};
use archive_common::storage::FileKind;
use archive_core::entities::{TeacherVerification, User};
use archive_core::value_objects::UserRole;
use archive_core::DomainError;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{
    AuthResponse, ChangePasswordRequest, CurrentUserResponse, LoginRequest, RegisterRequest,
    RegisterTeacherRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new student account
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        let user = self.create_account(request, UserRole::Student).await?;

        info!(user_id = %user.id, "Student registered");

        self.issue_response(&user)
    }

    /// Register a new teacher account
    ///
    /// The account starts as `teacher_pending` and a verification row is
    /// created with it atomically; an administrator review gates promotion.
    #[instrument(skip(self, request), fields(email = %request.profile.email))]
    pub async fn register_teacher(
        &self,
        request: RegisterTeacherRequest,
    ) -> ServiceResult<AuthResponse> {
        let proof = request
            .proof_document
            .ok_or(ServiceError::Domain(DomainError::ProofRequired))?;

        let profile = request.profile;
        profile
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        validate_password_strength(&profile.password).map_err(ServiceError::from)?;

        if self.ctx.user_repo().email_exists(&profile.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash =
            hash_password(&profile.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        let user_id = self.ctx.generate_id();
        let mut user = User::new(
            user_id,
            profile.username,
            profile.first_name,
            profile.last_name,
            profile.email,
            UserRole::TeacherPending,
        );
        user.school = profile.school;
        user.gender = profile.gender;
        user.birth_date = profile.birth_date;

        // Store the proof document before touching the database; a failed
        // insert leaves only an unreferenced file behind.
        let proof_path = self
            .ctx
            .storage()
            .save(
                FileKind::ProofDocument,
                user_id.into_inner(),
                &proof.file_name,
                &proof.bytes,
            )
            .await
            .map_err(ServiceError::from)?;

        let verification = TeacherVerification::new(self.ctx.generate_id(), user_id, proof_path);

        self.ctx
            .user_repo()
            .create_teacher(&user, &password_hash, &verification)
            .await?;

        info!(
            user_id = %user_id,
            verification_id = %verification.id,
            "Teacher registered, verification pending"
        );

        self.issue_response(&user)
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let record = self
            .ctx
            .user_repo()
            .find_for_login(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login failed: user not found");
                ServiceError::App(archive_common::AppError::InvalidCredentials)
            })?;

        let is_valid = verify_password(&request.password, &record.password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(user_id = %record.user.id, "Login failed: invalid password");
            return Err(ServiceError::App(
                archive_common::AppError::InvalidCredentials,
            ));
        }

        // Deactivated accounts fail with the stored reason so the client can
        // show it; credentials are checked first to avoid leaking the reason
        // to guessers.
        if let Some(deactivation) = record.deactivation {
            warn!(user_id = %record.user.id, "Login refused: account deactivated");
            return Err(DomainError::AccountDeactivated {
                reason: deactivation.reason,
            }
            .into());
        }

        info!(user_id = %record.user.id, "User logged in");

        self.issue_response(&record.user)
    }

    /// Change the current user's password
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        user_id: archive_core::Snowflake,
        request: ChangePasswordRequest,
    ) -> ServiceResult<()> {
        validate_password_strength(&request.new_password).map_err(ServiceError::from)?;

        let permissions = PermissionService::new(self.ctx);
        let user = permissions.require_user(user_id).await?;

        let current_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| ServiceError::App(archive_common::AppError::InvalidCredentials))?;

        let is_valid = verify_password(&request.current_password, &current_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            return Err(ServiceError::App(
                archive_common::AppError::InvalidCredentials,
            ));
        }

        let new_hash = hash_password(&request.new_password)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        self.ctx.user_repo().update_password(user.id, &new_hash).await?;

        info!(user_id = %user.id, "Password changed");

        Ok(())
    }

    /// Validate profile fields, create the user row, and return it
    async fn create_account(
        &self,
        request: RegisterRequest,
        role: UserRole,
    ) -> ServiceResult<User> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        let user_id = self.ctx.generate_id();
        let mut user = User::new(
            user_id,
            request.username,
            request.first_name,
            request.last_name,
            request.email,
            role,
        );
        user.school = request.school;
        user.gender = request.gender;
        user.birth_date = request.birth_date;

        self.ctx.user_repo().create(&user, &password_hash).await?;

        Ok(user)
    }

    /// Issue a bearer token for a freshly authenticated user
    fn issue_response(&self, user: &User) -> ServiceResult<AuthResponse> {
        let token = self
            .ctx
            .jwt_service()
            .issue_token(user.id, &user.email, user.role)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        Ok(AuthResponse::new(
            token.access_token,
            token.expires_in,
            CurrentUserResponse::from(user),
        ))
    }
}

#[cfg(test)]
mod tests {
    // Registration, login, and deactivation flows are covered end-to-end in
    // tests/integration.
}
