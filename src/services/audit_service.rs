use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::audit_log::AuditLog;

#[derive(Clone)]
pub struct AuditService {
    pool: PgPool,
}

impl AuditService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn log(
        &self,
        actor_id: Option<Uuid>,
        action: &str,
        notes: Option<String>,
    ) -> Result<AuditLog> {
        let entry = sqlx::query_as::<_, AuditLog>(
            r#"
            INSERT INTO audit_logs (actor_id, action, notes)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(actor_id)
        .bind(action)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(entry)
    }
}
