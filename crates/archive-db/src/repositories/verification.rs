//! PostgreSQL implementation of VerificationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use archive_core::entities::TeacherVerification;
use archive_core::error::DomainError;
use archive_core::traits::{RepoResult, VerificationRepository};
use archive_core::value_objects::Snowflake;

use crate::models::VerificationModel;

use super::error::{map_db_error, verification_not_found};

const VERIFICATION_COLUMNS: &str =
    "id, user_id, proof_document, status, rejection_reason, reviewed_by, created_at, reviewed_at";

/// PostgreSQL implementation of VerificationRepository
#[derive(Clone)]
pub struct PgVerificationRepository {
    pool: PgPool,
}

impl PgVerificationRepository {
    /// Create a new PgVerificationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Distinguish "no such row" from "already settled" after a conditional
    /// update matched nothing
    async fn settled_or_missing(&self, id: Snowflake) -> DomainError {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM teacher_verifications WHERE id = $1)
            ",
        )
        .bind(id.into_inner())
        .fetch_one(&self.pool)
        .await;

        match exists {
            Ok(true) => DomainError::AlreadyProcessed,
            Ok(false) => verification_not_found(id),
            Err(e) => map_db_error(e),
        }
    }
}

#[async_trait]
impl VerificationRepository for PgVerificationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<TeacherVerification>> {
        let result = sqlx::query_as::<_, VerificationModel>(&format!(
            "SELECT {VERIFICATION_COLUMNS} FROM teacher_verifications WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(TeacherVerification::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<TeacherVerification>> {
        let result = sqlx::query_as::<_, VerificationModel>(&format!(
            "SELECT {VERIFICATION_COLUMNS} FROM teacher_verifications WHERE user_id = $1"
        ))
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(TeacherVerification::from))
    }

    #[instrument(skip(self))]
    async fn list_pending(&self) -> RepoResult<Vec<TeacherVerification>> {
        let results = sqlx::query_as::<_, VerificationModel>(&format!(
            "SELECT {VERIFICATION_COLUMNS} FROM teacher_verifications \
             WHERE status = 'pending' ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(TeacherVerification::from).collect())
    }

    // Status flip and role promotion are one logical operation; the
    // conditional update serializes concurrent reviews of the same row.
    #[instrument(skip(self))]
    async fn approve(&self, id: Snowflake, reviewer_id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE teacher_verifications
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

        sqlx::query(
            r"
            UPDATE users SET role = 'teacher', updated_at = NOW()
            WHERE id = (SELECT user_id FROM teacher_verifications WHERE id = $1)
              AND role = 'teacher_pending'
            ",
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn reject(&self, id: Snowflake, reviewer_id: Snowflake, reason: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE teacher_verifications
            SET status = 'rejected', rejection_reason = $3, reviewed_by = $2, reviewed_at = NOW()
            WHERE id = $1 AND status = 'pending'
            ",
        )
        .bind(id.into_inner())
        .bind(reviewer_id.into_inner())
        .bind(reason)
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
        assert_send_sync::<PgVerificationRepository>();
    }
}
