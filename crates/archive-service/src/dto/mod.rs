//! Data transfer objects for the API surface

mod mappers;
mod requests;
mod responses;

pub use requests::{
    ChangePasswordRequest, CreateChannelRequest, CreateMaterialRequest, DeleteUserRequest,
    JoinByCodeRequest, LoginRequest, RegisterRequest, RegisterTeacherRequest, RejectRequest,
    RejectVerificationRequest, UpdateChannelRequest, UpdateMaterialRequest, UpdateProfileRequest,
    UploadedFile, WarnUserRequest,
};
pub use responses::{
    AccessRequestResponse, AuthResponse, ChannelResponse, CurrentUserResponse,
    DownloadEntryResponse, HealthResponse, JoinResponse, MaterialResponse, MemberResponse,
    OrphanCleanupResponse, ReadinessResponse, ReportResponse, StatusCounts, UserResponse,
    VerificationResponse, WarningResponse,
};
