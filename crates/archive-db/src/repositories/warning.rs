//! PostgreSQL implementation of WarningRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use archive_core::entities::UserWarning;
use archive_core::traits::{RepoResult, WarningRepository};
use archive_core::value_objects::Snowflake;

use crate::models::WarningModel;

use super::error::map_db_error;

/// PostgreSQL implementation of WarningRepository
#[derive(Clone)]
pub struct PgWarningRepository {
    pool: PgPool,
}

impl PgWarningRepository {
    /// Create a new PgWarningRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WarningRepository for PgWarningRepository {
    #[instrument(skip(self))]
    async fn create(&self, warning: &UserWarning) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO user_warnings (id, user_id, issued_by, message, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(warning.id.into_inner())
        .bind(warning.user_id.into_inner())
        .bind(warning.issued_by.into_inner())
        .bind(&warning.message)
        .bind(warning.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<UserWarning>> {
        let results = sqlx::query_as::<_, WarningModel>(
            r"
            SELECT id, user_id, issued_by, message, created_at
            FROM user_warnings
            WHERE user_id = $1
            ORDER BY created_at
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(UserWarning::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgWarningRepository>();
    }
}
