//! User warning entity <-> model mapper

use archive_core::entities::UserWarning;
use archive_core::value_objects::Snowflake;

use crate::models::WarningModel;

impl From<WarningModel> for UserWarning {
    fn from(model: WarningModel) -> Self {
        UserWarning {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            issued_by: Snowflake::new(model.issued_by),
            message: model.message,
            created_at: model.created_at,
        }
    }
}
