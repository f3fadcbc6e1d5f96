//! User entity <-> model mapper

use archive_core::entities::User;
use archive_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            role: model.role.parse().unwrap_or_default(),
            avatar: model.avatar,
            school: model.school,
            gender: model.gender,
            birth_date: model.birth_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
