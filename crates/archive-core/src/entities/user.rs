//! User entity - a registered account (student, teacher, or administrator)

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{Snowflake, UserRole};

/// User entity
///
/// Accounts are never hard-deleted; deactivation state (timestamp + reason)
/// lives in the persistence layer and deactivated users never surface here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    pub avatar: Option<String>,
    pub school: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(
        id: Snowflake,
        username: String,
        first_name: String,
        last_name: String,
        email: String,
        role: UserRole,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            first_name,
            last_name,
            email,
            role,
            avatar: None,
            school: None,
            gender: None,
            birth_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full legal name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Get avatar URL or default avatar URL
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(path) => format!("/files/{path}"),
            None => "/files/profile/default.png".to_string(),
        }
    }

    #[inline]
    pub fn is_administrator(&self) -> bool {
        self.role.is_administrator()
    }

    #[inline]
    pub fn is_teacher(&self) -> bool {
        self.role.is_teacher()
    }

    /// Update the display name
    pub fn set_username(&mut self, username: String) {
        self.username = username;
        self.updated_at = Utc::now();
    }

    /// Update the avatar path
    pub fn set_avatar(&mut self, avatar: Option<String>) {
        self.avatar = avatar;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: UserRole) -> User {
        User::new(
            Snowflake::new(1),
            "mshall".to_string(),
            "Mina".to_string(),
            "Shall".to_string(),
            "mina@example.com".to_string(),
            role,
        )
    }

    #[test]
    fn test_full_name() {
        let user = sample_user(UserRole::Student);
        assert_eq!(user.full_name(), "Mina Shall");
    }

    #[test]
    fn test_avatar_url_default() {
        let user = sample_user(UserRole::Student);
        assert_eq!(user.avatar_url(), "/files/profile/default.png");
    }

    #[test]
    fn test_avatar_url_with_path() {
        let mut user = sample_user(UserRole::Teacher);
        user.avatar = Some("profile/1/abc.png".to_string());
        assert_eq!(user.avatar_url(), "/files/profile/1/abc.png");
    }

    #[test]
    fn test_pending_teacher_is_not_teacher() {
        let user = sample_user(UserRole::TeacherPending);
        assert!(!user.is_teacher());
        assert!(!user.is_administrator());
    }
}
