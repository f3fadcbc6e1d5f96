//! Entity -> response DTO mappers

use archive_core::entities::{AccessRequest, Channel, Material, TeacherVerification, User, UserWarning};
use archive_core::traits::{DownloadEntry, MemberProfile, RequestProfile};

use super::responses::{
    AccessRequestResponse, ChannelResponse, CurrentUserResponse, DownloadEntryResponse,
    MaterialResponse, MemberResponse, UserResponse, VerificationResponse, WarningResponse,
};

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role: user.role,
            avatar: user.avatar.clone(),
            school: user.school.clone(),
            gender: user.gender.clone(),
            birth_date: user.birth_date,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            role: user.role,
            avatar: user.avatar.clone(),
            created_at: user.created_at,
        }
    }
}

impl ChannelResponse {
    /// Build a response for a viewer who may not see the invite secret
    pub fn for_viewer(channel: &Channel, include_access_code: bool) -> Self {
        Self {
            id: channel.id.to_string(),
            owner_id: channel.owner_id.to_string(),
            title: channel.title.clone(),
            slug: channel.slug.clone(),
            description: channel.description.clone(),
            visibility: channel.visibility,
            status: channel.status,
            subscriber_count: channel.subscriber_count,
            access_code: include_access_code.then(|| channel.access_code.clone()),
            approved_at: channel.approved_at,
            created_at: channel.created_at,
        }
    }
}

impl From<&Channel> for ChannelResponse {
    fn from(channel: &Channel) -> Self {
        Self::for_viewer(channel, false)
    }
}

impl From<&MemberProfile> for MemberResponse {
    fn from(member: &MemberProfile) -> Self {
        Self {
            user_id: member.user_id.to_string(),
            username: member.username.clone(),
            email: member.email.clone(),
            joined_at: member.joined_at,
        }
    }
}

impl From<&AccessRequest> for AccessRequestResponse {
    fn from(request: &AccessRequest) -> Self {
        Self {
            id: request.id.to_string(),
            channel_id: request.channel_id.to_string(),
            user_id: request.user_id.to_string(),
            status: request.status,
            username: None,
            email: None,
            created_at: request.created_at,
            reviewed_at: request.reviewed_at,
        }
    }
}

impl From<&RequestProfile> for AccessRequestResponse {
    fn from(profile: &RequestProfile) -> Self {
        Self {
            username: Some(profile.username.clone()),
            email: Some(profile.email.clone()),
            ..Self::from(&profile.request)
        }
    }
}

impl From<&Material> for MaterialResponse {
    fn from(material: &Material) -> Self {
        Self {
            id: material.id.to_string(),
            channel_id: material.channel_id.to_string(),
            uploaded_by: material.uploaded_by.to_string(),
            title: material.title.clone(),
            description: material.description.clone(),
            file_name: material.file_name.clone(),
            mime_type: material.mime_type.clone(),
            file_size: material.file_size,
            status: material.status,
            created_at: material.created_at,
            updated_at: material.updated_at,
        }
    }
}

impl From<&TeacherVerification> for VerificationResponse {
    fn from(verification: &TeacherVerification) -> Self {
        Self {
            id: verification.id.to_string(),
            user_id: verification.user_id.to_string(),
            proof_document: verification.proof_document.clone(),
            status: verification.status,
            rejection_reason: verification.rejection_reason.clone(),
            created_at: verification.created_at,
            reviewed_at: verification.reviewed_at,
        }
    }
}

impl From<&UserWarning> for WarningResponse {
    fn from(warning: &UserWarning) -> Self {
        Self {
            id: warning.id.to_string(),
            message: warning.message.clone(),
            issued_by: warning.issued_by.to_string(),
            created_at: warning.created_at,
        }
    }
}

impl From<&DownloadEntry> for DownloadEntryResponse {
    fn from(entry: &DownloadEntry) -> Self {
        Self {
            material_id: entry.record.material_id.to_string(),
            material_title: entry.material_title.clone(),
            user_id: entry.record.user_id.to_string(),
            username: entry.username.clone(),
            downloaded_at: entry.record.created_at,
        }
    }
}
