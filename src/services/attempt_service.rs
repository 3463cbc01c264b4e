use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::exam_attempt::ExamAttempt;

#[derive(Clone)]
pub struct AttemptService {
    pool: PgPool,
}

impl AttemptService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a graded submission. Every submission is recorded, passed
    /// or not.
    pub async fn record(
        &self,
        user_id: Uuid,
        exam_slug: &str,
        selected_ids: &[String],
        answers: &HashMap<String, String>,
        score_pct: i32,
        passed: bool,
    ) -> Result<ExamAttempt> {
        let attempt = sqlx::query_as::<_, ExamAttempt>(
            r#"
            INSERT INTO exam_attempts (user_id, exam_slug, selected_ids, answers, score_pct, passed)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(exam_slug)
        .bind(serde_json::to_value(selected_ids)?)
        .bind(serde_json::to_value(answers)?)
        .bind(score_pct)
        .bind(passed)
        .fetch_one(&self.pool)
        .await?;
        Ok(attempt)
    }

    pub async fn list_for_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<ExamAttempt>> {
        let attempts = sqlx::query_as::<_, ExamAttempt>(
            r#"
            SELECT * FROM exam_attempts
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(attempts)
    }
}
