//! PostgreSQL implementation of ChannelRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use archive_core::entities::Channel;
use archive_core::traits::{ChannelRepository, RepoResult};
use archive_core::value_objects::{ModerationStatus, Snowflake};

use crate::models::ChannelModel;

use super::error::{channel_not_found, map_db_error};

const CHANNEL_COLUMNS: &str = "id, owner_id, title, slug, description, access_code, visibility, \
     status, subscriber_count, reviewed_by, approved_at, created_at, updated_at, deleted_at";

/// PostgreSQL implementation of ChannelRepository
#[derive(Clone)]
pub struct PgChannelRepository {
    pool: PgPool,
}

impl PgChannelRepository {
    /// Create a new PgChannelRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check that a non-deleted channel row exists
    async fn exists(&self, id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM channels WHERE id = $1 AND deleted_at IS NULL)
            ",
        )
        .bind(id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

#[async_trait]
impl ChannelRepository for PgChannelRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>> {
        let result = sqlx::query_as::<_, ChannelModel>(&format!(
            "SELECT {CHANNEL_COLUMNS} FROM channels WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Channel::from))
    }

    #[instrument(skip(self))]
    async fn find_by_access_code(&self, code: &str) -> RepoResult<Option<Channel>> {
        let result = sqlx::query_as::<_, ChannelModel>(&format!(
            "SELECT {CHANNEL_COLUMNS} FROM channels WHERE access_code = $1 AND deleted_at IS NULL"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Channel::from))
    }

    #[instrument(skip(self))]
    async fn find_by_owner(&self, owner_id: Snowflake) -> RepoResult<Vec<Channel>> {
        let results = sqlx::query_as::<_, ChannelModel>(&format!(
            "SELECT {CHANNEL_COLUMNS} FROM channels \
             WHERE owner_id = $1 AND deleted_at IS NULL ORDER BY created_at DESC"
        ))
        .bind(owner_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Channel::from).collect())
    }

    // Students browse here: only approved channels are discoverable.
    #[instrument(skip(self))]
    async fn search(
        &self,
        query: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Channel>> {
        let limit = limit.clamp(1, 100);
        let pattern = query.map(|q| format!("%{q}%"));

        let results = sqlx::query_as::<_, ChannelModel>(&format!(
            "SELECT {CHANNEL_COLUMNS} FROM channels \
             WHERE status = 'approved' AND deleted_at IS NULL \
               AND ($1::text IS NULL OR title ILIKE $1) \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(pattern)
        .bind(limit)
        .bind(offset.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Channel::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_pending(&self) -> RepoResult<Vec<Channel>> {
        let results = sqlx::query_as::<_, ChannelModel>(&format!(
            "SELECT {CHANNEL_COLUMNS} FROM channels \
             WHERE status = 'pending' AND deleted_at IS NULL ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Channel::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, channel: &Channel) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO channels (id, owner_id, title, slug, description, access_code,
                                  visibility, status, subscriber_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(channel.id.into_inner())
        .bind(channel.owner_id.into_inner())
        .bind(&channel.title)
        .bind(&channel.slug)
        .bind(&channel.description)
        .bind(&channel.access_code)
        .bind(channel.visibility.as_str())
        .bind(channel.status.as_str())
        .bind(channel.subscriber_count)
        .bind(channel.created_at)
        .bind(channel.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, channel: &Channel) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE channels
            SET title = $2, slug = $3, description = $4, visibility = $5, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(channel.id.into_inner())
        .bind(&channel.title)
        .bind(&channel.slug)
        .bind(&channel.description)
        .bind(channel.visibility.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(channel_not_found(channel.id));
        }

        Ok(())
    }

    // Conditional update: a second approve/reject of the same channel is a
    // silent no-op rather than an error.
    #[instrument(skip(self))]
    async fn approve(&self, id: Snowflake, reviewer_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE channels
            SET status = 'approved', reviewed_by = $2, approved_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND status = 'pending' AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(reviewer_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 && !self.exists(id).await? {
            return Err(channel_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn reject(&self, id: Snowflake, reviewer_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE channels
            SET status = 'rejected', reviewed_by = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'pending' AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(reviewer_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 && !self.exists(id).await? {
            return Err(channel_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE channels SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(channel_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_by_status(&self) -> RepoResult<Vec<(ModerationStatus, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r"
            SELECT status, COUNT(*) FROM channels WHERE deleted_at IS NULL GROUP BY status
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .filter_map(|(status, count)| status.parse().ok().map(|s| (s, count)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgChannelRepository>();
    }
}
