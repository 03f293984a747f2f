use chrono::{DateTime, Utc};

use crate::session::question::Question;

/// One answered question, kept in memory for the sidebar. History does not
/// survive the process; score persistence is out of scope.
#[derive(Clone, Debug)]
pub struct AnswerRecord {
    pub prompt: String,
    pub selected: String,
    pub correct_answer: String,
    pub correct: bool,
    pub at: DateTime<Utc>,
}

impl AnswerRecord {
    pub fn from_answer(question: &Question, selected: &str, correct: bool) -> Self {
        Self {
            prompt: question.prompt.clone(),
            selected: selected.to_string(),
            correct_answer: question.correct_answer.clone(),
            correct,
            at: Utc::now(),
        }
    }
}
