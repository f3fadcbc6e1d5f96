//! # archive-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::{
    AccessRequestResponse, AuthResponse, ChangePasswordRequest, ChannelResponse,
    CreateChannelRequest, CreateMaterialRequest, CurrentUserResponse, DeleteUserRequest,
    DownloadEntryResponse, JoinByCodeRequest, JoinResponse, LoginRequest, MaterialResponse,
    MemberResponse, OrphanCleanupResponse, RegisterRequest, RegisterTeacherRequest, RejectRequest,
    RejectVerificationRequest, ReportResponse, UpdateChannelRequest, UpdateMaterialRequest,
    UpdateProfileRequest, UploadedFile, UserResponse, VerificationResponse, WarnUserRequest,
    WarningResponse,
};
pub use dto::{HealthResponse, ReadinessResponse};
pub use services::{
    AccessRequestService, AuthService, ChannelService, MaterialFile, MaterialService,
    MembershipService, ModerationService, PermissionService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
