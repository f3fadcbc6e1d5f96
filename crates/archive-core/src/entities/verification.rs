//! Teacher verification - proof-of-employment review gating teacher accounts

use chrono::{DateTime, Utc};

use crate::value_objects::{ModerationStatus, Snowflake};

/// Teacher verification entity
///
/// Exactly one row per teacher registration, created in the same transaction
/// as the user row. Approval promotes the owner from `teacher_pending` to
/// `teacher`; rejection records a mandatory reason. Both outcomes are
/// terminal - there is no re-submission path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherVerification {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub proof_document: String,
    pub status: ModerationStatus,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl TeacherVerification {
    /// Create a new pending verification
    pub fn new(id: Snowflake, user_id: Snowflake, proof_document: String) -> Self {
        Self {
            id,
            user_id,
            proof_document,
            status: ModerationStatus::Pending,
            rejection_reason: None,
            reviewed_by: None,
            created_at: Utc::now(),
            reviewed_at: None,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_verification_is_pending() {
        let verification = TeacherVerification::new(
            Snowflake::new(1),
            Snowflake::new(2),
            "proofs/2/contract.pdf".to_string(),
        );
        assert!(verification.is_pending());
        assert!(verification.rejection_reason.is_none());
    }
}
