use std::collections::HashMap;

use tracing::warn;

use crate::dto::exam_dto::IncorrectAnswer;
use crate::models::exam::{ExamBank, Question};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    pub correct: i32,
    pub total: i32,
    pub score_pct: i32,
    pub passed: bool,
    pub incorrect: Vec<IncorrectAnswer>,
}

pub struct ScoringService;

impl ScoringService {
    /// Grades one submission against the bank's answer key.
    ///
    /// The denominator is the number of selected ids as submitted. Ids the
    /// bank does not know are skipped with a warning but still count toward
    /// the total.
    pub fn score(
        bank: &ExamBank,
        selected_ids: &[String],
        answers: &HashMap<String, String>,
    ) -> ScoreResult {
        let key: HashMap<&str, &Question> =
            bank.questions.iter().map(|q| (q.id.as_str(), q)).collect();

        let total = selected_ids.len() as i32;
        let mut correct: i32 = 0;
        let mut incorrect: Vec<IncorrectAnswer> = Vec::new();

        for id in selected_ids {
            let Some(question) = key.get(id.as_str()) else {
                warn!("submission references unknown question id '{}'", id);
                continue;
            };
            match answers.get(id) {
                Some(chosen) if chosen == &question.answer => correct += 1,
                chosen => incorrect.push(IncorrectAnswer {
                    id: id.clone(),
                    correct: question.answer.clone(),
                    chosen: chosen.cloned(),
                    explain: question.explain.clone(),
                }),
            }
        }

        let score_pct = if total > 0 {
            (f64::from(correct) * 100.0 / f64::from(total)).round() as i32
        } else {
            0
        };
        let passed = score_pct >= bank.pass_mark();

        ScoreResult {
            correct,
            total,
            score_pct,
            passed,
            incorrect,
        }
    }
}
