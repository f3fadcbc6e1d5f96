//! Material entity - a file published to a channel

use chrono::{DateTime, Utc};

use crate::value_objects::{ModerationStatus, Snowflake};

/// Material entity
///
/// `uploaded_by` always equals the owning channel's `owner_id`; the upload
/// path enforces this before insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub uploaded_by: Snowflake,
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_path: String,
    pub mime_type: String,
    pub file_size: i64,
    pub status: ModerationStatus,
    pub reviewed_by: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Material {
    /// Create a new Material pending moderation
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Snowflake,
        channel_id: Snowflake,
        uploaded_by: Snowflake,
        title: String,
        description: Option<String>,
        file_name: String,
        file_path: String,
        mime_type: String,
        file_size: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            channel_id,
            uploaded_by,
            title,
            description,
            file_name,
            file_path,
            mime_type,
            file_size,
            status: ModerationStatus::Pending,
            reviewed_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_approved(&self) -> bool {
        self.status.is_approved()
    }

    /// Replace the stored file; a replacement goes back through moderation
    pub fn replace_file(&mut self, file_name: String, file_path: String, mime_type: String, file_size: i64) {
        self.file_name = file_name;
        self.file_path = file_path;
        self.mime_type = mime_type;
        self.file_size = file_size;
        self.status = ModerationStatus::Pending;
        self.reviewed_by = None;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_material() -> Material {
        Material::new(
            Snowflake::new(10),
            Snowflake::new(1),
            Snowflake::new(2),
            "Week 1 slides".to_string(),
            None,
            "week1.pdf".to_string(),
            "materials/1/week1.pdf".to_string(),
            "application/pdf".to_string(),
            4096,
        )
    }

    #[test]
    fn test_new_material_is_pending() {
        let material = sample_material();
        assert_eq!(material.status, ModerationStatus::Pending);
        assert!(!material.is_approved());
    }

    #[test]
    fn test_replace_file_resets_moderation() {
        let mut material = sample_material();
        material.status = ModerationStatus::Approved;
        material.reviewed_by = Some(Snowflake::new(99));

        material.replace_file(
            "week1-v2.pdf".to_string(),
            "materials/1/week1-v2.pdf".to_string(),
            "application/pdf".to_string(),
            8192,
        );

        assert_eq!(material.status, ModerationStatus::Pending);
        assert!(material.reviewed_by.is_none());
        assert_eq!(material.file_name, "week1-v2.pdf");
    }
}
