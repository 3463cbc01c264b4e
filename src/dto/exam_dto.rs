use crate::models::exam_attempt::ExamAttempt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Inbound submission body. Absent fields default to empty; fields with
/// the wrong shape are rejected by the extractor.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitExamRequest {
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub selected_ids: Vec<String>,
    #[serde(default)]
    pub answers: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncorrectAnswer {
    pub id: String,
    pub correct: String,
    pub chosen: Option<String>,
    pub explain: Option<String>,
}

/// `certificate_error` serializes as an explicit `null` when unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitExamResponse {
    pub ok: bool,
    pub passed: bool,
    pub score_pct: i32,
    pub correct: i32,
    pub total: i32,
    pub incorrect: Vec<IncorrectAnswer>,
    pub certificate_issued: bool,
    pub certificate_error: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ExamInfoQuery {
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamInfoResponse {
    pub exam_slug: String,
    pub locale: String,
    pub total_questions: usize,
    pub pass_pct: i32,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ListAttemptsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptSummary {
    pub id: uuid::Uuid,
    pub exam_slug: String,
    pub score_pct: i32,
    pub passed: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<ExamAttempt> for AttemptSummary {
    fn from(attempt: ExamAttempt) -> Self {
        Self {
            id: attempt.id,
            exam_slug: attempt.exam_slug,
            score_pct: attempt.score_pct,
            passed: attempt.passed,
            created_at: attempt.created_at,
        }
    }
}
