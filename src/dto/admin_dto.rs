use crate::models::enrollment::Enrollment;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEnrollmentPayload {
    pub user_id: Uuid,
    #[validate(length(min = 1, message = "course_slug must not be empty"))]
    pub course_slug: String,
    #[validate(range(min = 0, max = 100))]
    pub progress_pct: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub passed: bool,
    pub progress_pct: i32,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(enrollment: Enrollment) -> Self {
        Self {
            id: enrollment.id,
            user_id: enrollment.user_id,
            course_id: enrollment.course_id,
            passed: enrollment.passed,
            progress_pct: enrollment.progress_pct,
            created_at: enrollment.created_at,
            updated_at: enrollment.updated_at,
        }
    }
}
