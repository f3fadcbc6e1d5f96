//! Channel entity - a teacher-owned grouping of study materials

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ModerationStatus, Snowflake};

/// Channel visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }

    #[inline]
    pub const fn is_private(&self) -> bool {
        matches!(self, Self::Private)
    }
}

impl std::str::FromStr for Visibility {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            _ => Err(()),
        }
    }
}

/// Channel entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub access_code: String,
    pub visibility: Visibility,
    pub status: ModerationStatus,
    pub subscriber_count: i64,
    pub reviewed_by: Option<Snowflake>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Channel {
    /// Create a new Channel pending moderation
    pub fn new(
        id: Snowflake,
        owner_id: Snowflake,
        title: String,
        description: Option<String>,
        visibility: Visibility,
        access_code: String,
    ) -> Self {
        let now = Utc::now();
        let slug = slugify(&title);
        Self {
            id,
            owner_id,
            title,
            slug,
            description,
            access_code,
            visibility,
            status: ModerationStatus::Pending,
            subscriber_count: 0,
            reviewed_by: None,
            approved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_approved(&self) -> bool {
        self.status.is_approved()
    }

    #[inline]
    pub fn is_private(&self) -> bool {
        self.visibility.is_private()
    }

    /// Check whether a given user owns this channel
    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.owner_id == user_id
    }

    /// Update the title; the slug tracks it
    pub fn set_title(&mut self, title: String) {
        self.slug = slugify(&title);
        self.title = title;
        self.updated_at = Utc::now();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.updated_at = Utc::now();
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
        self.updated_at = Utc::now();
    }
}

/// Generate a random channel access code (invite secret)
pub fn generate_access_code() -> String {
    use rand::Rng;

    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const CODE_LENGTH: usize = 8;

    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Derive a URL-safe slug from a channel title
///
/// Lowercases, maps runs of non-alphanumeric characters to single hyphens,
/// and trims leading/trailing hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true;
    for ch in title.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_channel_is_pending() {
        let channel = Channel::new(
            Snowflake::new(1),
            Snowflake::new(2),
            "Linear Algebra 101".to_string(),
            None,
            Visibility::Public,
            "Abcd1234".to_string(),
        );
        assert_eq!(channel.status, ModerationStatus::Pending);
        assert_eq!(channel.subscriber_count, 0);
        assert_eq!(channel.slug, "linear-algebra-101");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Linear Algebra 101"), "linear-algebra-101");
        assert_eq!(slugify("  C++ / Rust!  "), "c-rust");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify("Übungen"), "übungen");
    }

    #[test]
    fn test_set_title_updates_slug() {
        let mut channel = Channel::new(
            Snowflake::new(1),
            Snowflake::new(2),
            "Old Title".to_string(),
            None,
            Visibility::Public,
            "Abcd1234".to_string(),
        );
        channel.set_title("New Title".to_string());
        assert_eq!(channel.slug, "new-title");
    }

    #[test]
    fn test_access_code_shape() {
        let code = generate_access_code();
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_access_codes_differ() {
        // Statistically certain with a 62^8 space
        assert_ne!(generate_access_code(), generate_access_code());
    }

    #[test]
    fn test_ownership() {
        let channel = Channel::new(
            Snowflake::new(1),
            Snowflake::new(2),
            "T".to_string(),
            None,
            Visibility::Private,
            "Abcd1234".to_string(),
        );
        assert!(channel.is_owned_by(Snowflake::new(2)));
        assert!(!channel.is_owned_by(Snowflake::new(3)));
        assert!(channel.is_private());
    }
}
