use serde::{Deserialize, Serialize};

pub const DEFAULT_PASS_PCT: i32 = 80;

/// Answer-key entry of a locale's exam bank. Bank files also carry the
/// question text and choices for the client; serde ignores those here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub answer: String,
    #[serde(default)]
    pub explain: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamBank {
    #[serde(default)]
    pub pass_pct: Option<i32>,
    pub questions: Vec<Question>,
}

impl ExamBank {
    pub fn pass_mark(&self) -> i32 {
        self.pass_pct.unwrap_or(DEFAULT_PASS_PCT)
    }
}
