//! Access request entity <-> model mapper

use archive_core::entities::AccessRequest;
use archive_core::traits::RequestProfile;
use archive_core::value_objects::Snowflake;

use crate::models::{AccessRequestModel, RequestProfileModel};

impl From<AccessRequestModel> for AccessRequest {
    fn from(model: AccessRequestModel) -> Self {
        AccessRequest {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            user_id: Snowflake::new(model.user_id),
            status: model.status.parse().unwrap_or_default(),
            reviewed_by: model.reviewed_by.map(Snowflake::new),
            created_at: model.created_at,
            reviewed_at: model.reviewed_at,
        }
    }
}

/// Convert a joined request row into a request profile
pub fn request_profile(model: RequestProfileModel) -> RequestProfile {
    RequestProfile {
        request: AccessRequest {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            user_id: Snowflake::new(model.user_id),
            status: model.status.parse().unwrap_or_default(),
            reviewed_by: model.reviewed_by.map(Snowflake::new),
            created_at: model.created_at,
            reviewed_at: model.reviewed_at,
        },
        username: model.username,
        email: model.email,
    }
}
