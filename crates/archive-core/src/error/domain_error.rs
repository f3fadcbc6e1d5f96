//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Channel not found: {0}")]
    ChannelNotFound(Snowflake),

    #[error("Material not found: {0}")]
    MaterialNotFound(Snowflake),

    #[error("Teacher verification not found: {0}")]
    VerificationNotFound(Snowflake),

    #[error("Access request not found: {0}")]
    AccessRequestNotFound(Snowflake),

    #[error("Not a member of this channel")]
    MembershipNotFound,

    #[error("No channel matches this access code")]
    AccessCodeNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("A reason is required for this action")]
    ReasonRequired,

    #[error("A proof document is required for teacher registration")]
    ProofRequired,

    #[error("Channel is not approved")]
    ChannelNotApproved,

    #[error("Channel is not public")]
    ChannelNotPublic,

    #[error("Channel is not private")]
    ChannelNotPrivate,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Administrator role required")]
    AdministratorOnly,

    #[error("Teacher role required")]
    TeacherOnly,

    #[error("Not the channel owner")]
    NotChannelOwner,

    #[error("Account deactivated: {reason}")]
    AccountDeactivated { reason: String },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Already a member of this channel")]
    AlreadyMember,

    #[error("A pending request for this channel already exists")]
    DuplicateRequest,

    #[error("Request was already processed")]
    AlreadyProcessed,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::MaterialNotFound(_) => "UNKNOWN_MATERIAL",
            Self::VerificationNotFound(_) => "UNKNOWN_VERIFICATION",
            Self::AccessRequestNotFound(_) => "UNKNOWN_REQUEST",
            Self::MembershipNotFound => "MEMBERSHIP_NOT_FOUND",
            Self::AccessCodeNotFound => "UNKNOWN_ACCESS_CODE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::ReasonRequired => "REASON_REQUIRED",
            Self::ProofRequired => "PROOF_REQUIRED",
            Self::ChannelNotApproved => "CHANNEL_NOT_APPROVED",
            Self::ChannelNotPublic => "CHANNEL_NOT_PUBLIC",
            Self::ChannelNotPrivate => "CHANNEL_NOT_PRIVATE",

            // Authorization
            Self::AdministratorOnly => "ADMINISTRATOR_ONLY",
            Self::TeacherOnly => "TEACHER_ONLY",
            Self::NotChannelOwner => "NOT_CHANNEL_OWNER",
            Self::AccountDeactivated { .. } => "ACCOUNT_DEACTIVATED",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::DuplicateRequest => "DUPLICATE_REQUEST",
            Self::AlreadyProcessed => "ALREADY_PROCESSED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ChannelNotFound(_)
                | Self::MaterialNotFound(_)
                | Self::VerificationNotFound(_)
                | Self::AccessRequestNotFound(_)
                | Self::MembershipNotFound
                | Self::AccessCodeNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::WeakPassword(_)
                | Self::ReasonRequired
                | Self::ProofRequired
                | Self::ChannelNotApproved
                | Self::ChannelNotPublic
                | Self::ChannelNotPrivate
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::AdministratorOnly
                | Self::TeacherOnly
                | Self::NotChannelOwner
                | Self::AccountDeactivated { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::AlreadyMember
                | Self::DuplicateRequest
                | Self::AlreadyProcessed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::UserNotFound(Snowflake::new(1));
        assert_eq!(err.code(), "UNKNOWN_USER");

        let err = DomainError::AdministratorOnly;
        assert_eq!(err.code(), "ADMINISTRATOR_ONLY");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::ChannelNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::AccessCodeNotFound.is_not_found());
        assert!(!DomainError::EmailAlreadyExists.is_not_found());
    }

    #[test]
    fn test_is_authorization() {
        assert!(DomainError::NotChannelOwner.is_authorization());
        assert!(DomainError::AccountDeactivated {
            reason: "spam".to_string()
        }
        .is_authorization());
        assert!(!DomainError::DuplicateRequest.is_authorization());
    }

    #[test]
    fn test_is_conflict() {
        assert!(DomainError::AlreadyProcessed.is_conflict());
        assert!(DomainError::DuplicateRequest.is_conflict());
        assert!(!DomainError::ChannelNotApproved.is_conflict());
    }

    #[test]
    fn test_deactivated_message_carries_reason() {
        let err = DomainError::AccountDeactivated {
            reason: "repeated policy violations".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Account deactivated: repeated policy violations"
        );
    }
}
