//! Material entity <-> model mapper

use archive_core::entities::Material;
use archive_core::value_objects::Snowflake;

use crate::models::MaterialModel;

impl From<MaterialModel> for Material {
    fn from(model: MaterialModel) -> Self {
        Material {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            uploaded_by: Snowflake::new(model.uploaded_by),
            title: model.title,
            description: model.description,
            file_name: model.file_name,
            file_path: model.file_path,
            mime_type: model.mime_type,
            file_size: model.file_size,
            status: model.status.parse().unwrap_or_default(),
            reviewed_by: model.reviewed_by.map(Snowflake::new),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
