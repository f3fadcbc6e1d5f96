//! Download record - append-only audit log of material downloads

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// One download event; writes are best-effort and never block the download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRecord {
    pub id: Snowflake,
    pub material_id: Snowflake,
    pub user_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl DownloadRecord {
    /// Create a new record timestamped now
    pub fn new(id: Snowflake, material_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            id,
            material_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}
