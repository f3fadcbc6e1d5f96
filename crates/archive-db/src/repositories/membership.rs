//! PostgreSQL implementation of MembershipRepository
//!
//! Join and leave pair the membership row mutation with the channel's
//! subscriber counter inside one transaction; the composite primary key on
//! channel_members makes duplicate joins impossible even under races.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use archive_core::entities::Channel;
use archive_core::traits::{MemberProfile, MembershipRepository, RepoResult};
use archive_core::value_objects::Snowflake;

use crate::mappers::member_profile;
use crate::models::{ChannelModel, MemberProfileModel};

use super::error::map_db_error;

/// PostgreSQL implementation of MembershipRepository
#[derive(Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    /// Create a new PgMembershipRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PgMembershipRepository {
    #[instrument(skip(self))]
    async fn is_member(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM channel_members WHERE channel_id = $1 AND user_id = $2)
            ",
        )
        .bind(channel_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn join(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let inserted = sqlx::query(
            r"
            INSERT INTO channel_members (channel_id, user_id, joined_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (channel_id, user_id) DO NOTHING
            ",
        )
        .bind(channel_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected()
            == 1;

        // The counter only moves when a row actually landed
        if inserted {
            sqlx::query(
                r"
                UPDATE channels SET subscriber_count = subscriber_count + 1 WHERE id = $1
                ",
            )
            .bind(channel_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn leave(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let deleted = sqlx::query(
            r"
            DELETE FROM channel_members WHERE channel_id = $1 AND user_id = $2
            ",
        )
        .bind(channel_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected()
            == 1;

        if deleted {
            // Clamped at zero in case the counter ever drifted low
            sqlx::query(
                r"
                UPDATE channels SET subscriber_count = GREATEST(subscriber_count - 1, 0)
                WHERE id = $1
                ",
            )
            .bind(channel_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn members(&self, channel_id: Snowflake) -> RepoResult<Vec<MemberProfile>> {
        let results = sqlx::query_as::<_, MemberProfileModel>(
            r"
            SELECT m.user_id, u.username, u.email, m.joined_at
            FROM channel_members m
            JOIN users u ON u.id = m.user_id
            WHERE m.channel_id = $1 AND u.deleted_at IS NULL
            ORDER BY m.joined_at DESC
            ",
        )
        .bind(channel_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(member_profile).collect())
    }

    #[instrument(skip(self))]
    async fn channels_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<Channel>> {
        let results = sqlx::query_as::<_, ChannelModel>(
            r"
            SELECT c.id, c.owner_id, c.title, c.slug, c.description, c.access_code,
                   c.visibility, c.status, c.subscriber_count, c.reviewed_by, c.approved_at,
                   c.created_at, c.updated_at, c.deleted_at
            FROM channels c
            JOIN channel_members m ON m.channel_id = c.id
            WHERE m.user_id = $1 AND c.deleted_at IS NULL
            ORDER BY m.joined_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Channel::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM channel_members
            ",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgMembershipRepository>();
    }
}
