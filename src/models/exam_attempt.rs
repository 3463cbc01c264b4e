use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExamAttempt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub exam_slug: String,
    pub selected_ids: JsonValue,
    pub answers: JsonValue,
    pub score_pct: i32,
    pub passed: bool,
    pub created_at: Option<DateTime<Utc>>,
}
