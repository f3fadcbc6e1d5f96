//! PostgreSQL implementation of DownloadRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use archive_core::entities::DownloadRecord;
use archive_core::traits::{DownloadEntry, DownloadRepository, RepoResult};

use crate::mappers::download_entry;
use crate::models::DownloadEntryModel;

use super::error::map_db_error;

/// PostgreSQL implementation of DownloadRepository
#[derive(Clone)]
pub struct PgDownloadRepository {
    pool: PgPool,
}

impl PgDownloadRepository {
    /// Create a new PgDownloadRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DownloadRepository for PgDownloadRepository {
    #[instrument(skip(self))]
    async fn record(&self, record: &DownloadRecord) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO material_downloads (id, material_id, user_id, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(record.id.into_inner())
        .bind(record.material_id.into_inner())
        .bind(record.user_id.into_inner())
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn recent(&self, limit: i64) -> RepoResult<Vec<DownloadEntry>> {
        let limit = limit.clamp(1, 500);

        let results = sqlx::query_as::<_, DownloadEntryModel>(
            r"
            SELECT d.id, d.material_id, d.user_id, d.created_at,
                   m.title AS material_title, u.username
            FROM material_downloads d
            JOIN materials m ON m.id = d.material_id
            JOIN users u ON u.id = d.user_id
            ORDER BY d.created_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(download_entry).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM material_downloads
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
        assert_send_sync::<PgDownloadRepository>();
    }
}
