//! Download record entity <-> model mapper

use archive_core::entities::DownloadRecord;
use archive_core::traits::DownloadEntry;
use archive_core::value_objects::Snowflake;

use crate::models::{DownloadEntryModel, DownloadModel};

impl From<DownloadModel> for DownloadRecord {
    fn from(model: DownloadModel) -> Self {
        DownloadRecord {
            id: Snowflake::new(model.id),
            material_id: Snowflake::new(model.material_id),
            user_id: Snowflake::new(model.user_id),
            created_at: model.created_at,
        }
    }
}

/// Convert a joined download row into an audit entry
pub fn download_entry(model: DownloadEntryModel) -> DownloadEntry {
    DownloadEntry {
        record: DownloadRecord {
            id: Snowflake::new(model.id),
            material_id: Snowflake::new(model.material_id),
            user_id: Snowflake::new(model.user_id),
            created_at: model.created_at,
        },
        material_title: model.material_title,
        username: model.username,
    }
}
