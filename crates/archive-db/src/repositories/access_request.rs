//! PostgreSQL implementation of AccessRequestRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use archive_core::entities::AccessRequest;
use archive_core::error::DomainError;
use archive_core::traits::{AccessRequestRepository, RepoResult, RequestProfile};
use archive_core::value_objects::Snowflake;

use crate::mappers::request_profile;
use crate::models::{AccessRequestModel, RequestProfileModel};

use super::error::{map_db_error, map_unique_violation, request_not_found};

const REQUEST_COLUMNS: &str =
    "id, channel_id, user_id, status, reviewed_by, created_at, reviewed_at";

/// PostgreSQL implementation of AccessRequestRepository
#[derive(Clone)]
pub struct PgAccessRequestRepository {
    pool: PgPool,
}

impl PgAccessRequestRepository {
    /// Create a new PgAccessRequestRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Distinguish "no such row" from "already settled" after a conditional
    /// update matched nothing
    async fn settled_or_missing(&self, id: Snowflake) -> DomainError {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM access_requests WHERE id = $1)
            ",
        )
        .bind(id.into_inner())
        .fetch_one(&self.pool)
        .await;

        match exists {
            Ok(true) => DomainError::AlreadyProcessed,
            Ok(false) => request_not_found(id),
            Err(e) => map_db_error(e),
        }
    }
}

#[async_trait]
impl AccessRequestRepository for PgAccessRequestRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<AccessRequest>> {
        let result = sqlx::query_as::<_, AccessRequestModel>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM access_requests WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(AccessRequest::from))
    }

    #[instrument(skip(self))]
    async fn has_pending(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM access_requests
                WHERE channel_id = $1 AND user_id = $2 AND status = 'pending'
            )
            ",
        )
        .bind(channel_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    // The partial unique index on (channel_id, user_id) WHERE pending backs
    // up the application-level duplicate check.
    #[instrument(skip(self))]
    async fn create(&self, request: &AccessRequest) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO access_requests (id, channel_id, user_id, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(request.id.into_inner())
        .bind(request.channel_id.into_inner())
        .bind(request.user_id.into_inner())
        .bind(request.status.as_str())
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateRequest))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_pending(&self, channel_id: Snowflake) -> RepoResult<Vec<RequestProfile>> {
        let results = sqlx::query_as::<_, RequestProfileModel>(
            r"
            SELECT r.id, r.channel_id, r.user_id, r.status, r.reviewed_by,
                   r.created_at, r.reviewed_at, u.username, u.email
            FROM access_requests r
            JOIN users u ON u.id = r.user_id
            WHERE r.channel_id = $1 AND r.status = 'pending' AND u.deleted_at IS NULL
            ORDER BY r.created_at DESC
            ",
        )
        .bind(channel_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(request_profile).collect())
    }

    // Approval creates the membership and moves the counter in the same
    // transaction as the status flip; partial state never escapes.
    #[instrument(skip(self))]
    async fn approve(&self, id: Snowflake, reviewer_id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE access_requests
            SET status = 'approved', reviewed_by = $2, reviewed_at = NOW()
            WHERE id = $1 AND status = 'pending'
            ",
        )
        .bind(id.into_inner())
        .bind(reviewer_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.ok();
            return Err(self.settled_or_missing(id).await);
        }

        let inserted = sqlx::query(
            r"
            INSERT INTO channel_members (channel_id, user_id, joined_at)
            SELECT channel_id, user_id, NOW() FROM access_requests WHERE id = $1
            ON CONFLICT (channel_id, user_id) DO NOTHING
            ",
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected()
            == 1;

        if inserted {
            sqlx::query(
                r"
                UPDATE channels SET subscriber_count = subscriber_count + 1
                WHERE id = (SELECT channel_id FROM access_requests WHERE id = $1)
                ",
            )
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn reject(&self, id: Snowflake, reviewer_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE access_requests
            SET status = 'rejected', reviewed_by = $2, reviewed_at = NOW()
            WHERE id = $1 AND status = 'pending'
            ",
        )
        .bind(id.into_inner())
        .bind(reviewer_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(self.settled_or_missing(id).await);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgAccessRequestRepository>();
    }
}
