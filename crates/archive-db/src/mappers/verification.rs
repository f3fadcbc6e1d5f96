//! Teacher verification entity <-> model mapper

use archive_core::entities::TeacherVerification;
use archive_core::value_objects::Snowflake;

use crate::models::VerificationModel;

impl From<VerificationModel> for TeacherVerification {
    fn from(model: VerificationModel) -> Self {
        TeacherVerification {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            proof_document: model.proof_document,
            status: model.status.parse().unwrap_or_default(),
            rejection_reason: model.rejection_reason,
            reviewed_by: model.reviewed_by.map(Snowflake::new),
            created_at: model.created_at,
            reviewed_at: model.reviewed_at,
        }
    }
}
