use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::course::Course;
use crate::models::enrollment::Enrollment;

#[derive(Clone)]
pub struct EnrollmentService {
    pool: PgPool,
}

impl EnrollmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Most recently created enrollment for the user, regardless of course.
    pub async fn latest_for_user(&self, user_id: Uuid) -> Result<Option<Enrollment>> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT * FROM enrollments
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(enrollment)
    }

    /// Marks the enrollment passed and complete. The flip is one way; later
    /// failed attempts never reset it.
    pub async fn mark_passed(&self, enrollment_id: Uuid) -> Result<Enrollment> {
        let updated = sqlx::query_as::<_, Enrollment>(
            r#"
            UPDATE enrollments
            SET passed = TRUE, progress_pct = 100, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(enrollment_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        course_slug: &str,
        progress_pct: i32,
    ) -> Result<Enrollment> {
        let course = sqlx::query_as::<_, Course>(r#"SELECT * FROM courses WHERE slug = $1"#)
            .bind(course_slug)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("course '{}' not found", course_slug)))?;

        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            INSERT INTO enrollments (user_id, course_id, passed, progress_pct)
            VALUES ($1, $2, FALSE, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(course.id)
        .bind(progress_pct)
        .fetch_one(&self.pool)
        .await?;
        Ok(enrollment)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Enrollment>> {
        let enrollments = sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT * FROM enrollments
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(enrollments)
    }
}
