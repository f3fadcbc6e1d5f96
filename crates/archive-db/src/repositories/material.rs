//! PostgreSQL implementation of MaterialRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use archive_core::entities::Material;
use archive_core::traits::{MaterialRepository, RepoResult};
use archive_core::value_objects::{ModerationStatus, Snowflake};

use crate::models::MaterialModel;

use super::error::{map_db_error, material_not_found};

const MATERIAL_COLUMNS: &str = "id, channel_id, uploaded_by, title, description, file_name, \
     file_path, mime_type, file_size, status, reviewed_by, created_at, updated_at, deleted_at";

/// PostgreSQL implementation of MaterialRepository
#[derive(Clone)]
pub struct PgMaterialRepository {
    pool: PgPool,
}

impl PgMaterialRepository {
    /// Create a new PgMaterialRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check that a non-deleted material row exists
    async fn exists(&self, id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM materials WHERE id = $1 AND deleted_at IS NULL)
            ",
        )
        .bind(id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

#[async_trait]
impl MaterialRepository for PgMaterialRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Material>> {
        let result = sqlx::query_as::<_, MaterialModel>(&format!(
            "SELECT {MATERIAL_COLUMNS} FROM materials WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Material::from))
    }

    #[instrument(skip(self))]
    async fn find_by_channel(
        &self,
        channel_id: Snowflake,
        approved_only: bool,
    ) -> RepoResult<Vec<Material>> {
        let results = if approved_only {
            sqlx::query_as::<_, MaterialModel>(&format!(
                "SELECT {MATERIAL_COLUMNS} FROM materials \
                 WHERE channel_id = $1 AND status = 'approved' AND deleted_at IS NULL \
                 ORDER BY created_at DESC"
            ))
            .bind(channel_id.into_inner())
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, MaterialModel>(&format!(
                "SELECT {MATERIAL_COLUMNS} FROM materials \
                 WHERE channel_id = $1 AND deleted_at IS NULL \
                 ORDER BY created_at DESC"
            ))
            .bind(channel_id.into_inner())
            .fetch_all(&self.pool)
            .await
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Material::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_pending(&self) -> RepoResult<Vec<Material>> {
        let results = sqlx::query_as::<_, MaterialModel>(&format!(
            "SELECT {MATERIAL_COLUMNS} FROM materials \
             WHERE status = 'pending' AND deleted_at IS NULL ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Material::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, material: &Material) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO materials (id, channel_id, uploaded_by, title, description, file_name,
                                   file_path, mime_type, file_size, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(material.id.into_inner())
        .bind(material.channel_id.into_inner())
        .bind(material.uploaded_by.into_inner())
        .bind(&material.title)
        .bind(&material.description)
        .bind(&material.file_name)
        .bind(&material.file_path)
        .bind(&material.mime_type)
        .bind(material.file_size)
        .bind(material.status.as_str())
        .bind(material.created_at)
        .bind(material.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    // Content replacement writes the new file fields and the reset status in
    // one statement.
    #[instrument(skip(self))]
    async fn update(&self, material: &Material) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE materials
            SET title = $2, description = $3, file_name = $4, file_path = $5,
                mime_type = $6, file_size = $7, status = $8, reviewed_by = $9,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(material.id.into_inner())
        .bind(&material.title)
        .bind(&material.description)
        .bind(&material.file_name)
        .bind(&material.file_path)
        .bind(&material.mime_type)
        .bind(material.file_size)
        .bind(material.status.as_str())
        .bind(material.reviewed_by.map(Snowflake::into_inner))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(material_not_found(material.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn approve(&self, id: Snowflake, reviewer_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE materials
            SET status = 'approved', reviewed_by = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'pending' AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(reviewer_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 && !self.exists(id).await? {
            return Err(material_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn reject(&self, id: Snowflake, reviewer_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE materials
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
            return Err(material_not_found(id));
        }

        Ok(())
    }

    // Maintenance sweep: materials of soft-deleted channels follow their
    // channel out of sight.
    #[instrument(skip(self))]
    async fn soft_delete_orphaned(&self) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE materials m
            SET deleted_at = NOW(), updated_at = NOW()
            FROM channels c
            WHERE m.channel_id = c.id
              AND c.deleted_at IS NOT NULL
              AND m.deleted_at IS NULL
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn count_by_status(&self) -> RepoResult<Vec<(ModerationStatus, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r"
            SELECT status, COUNT(*) FROM materials WHERE deleted_at IS NULL GROUP BY status
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
        assert_send_sync::<PgMaterialRepository>();
    }
}
