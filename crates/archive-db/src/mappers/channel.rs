//! Channel entity <-> model mapper

use archive_core::entities::Channel;
use archive_core::value_objects::Snowflake;

use crate::models::ChannelModel;

impl From<ChannelModel> for Channel {
    fn from(model: ChannelModel) -> Self {
        Channel {
            id: Snowflake::new(model.id),
            owner_id: Snowflake::new(model.owner_id),
            title: model.title,
            slug: model.slug,
            description: model.description,
            access_code: model.access_code,
            visibility: model.visibility.parse().unwrap_or_default(),
            status: model.status.parse().unwrap_or_default(),
            subscriber_count: model.subscriber_count,
            reviewed_by: model.reviewed_by.map(Snowflake::new),
            approved_at: model.approved_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
