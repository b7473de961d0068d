use serde::{Deserialize, Serialize};

/// A single answer option. Within a repaired question exactly one option
/// carries `is_correct = true`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionOption {
    pub option: String,
    pub is_correct: bool,
}

/// A repaired multiple-choice question. `difficulty` is kept as the raw
/// string so that labels outside the usual basic/intermediate/advanced set
/// survive repair and show up as their own metadata bucket.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub question_id: u32,
    pub question_text: String,
    pub explanation: String,
    pub options: Vec<QuestionOption>,
    pub difficulty: String,
    pub topic_area: String,
}

impl Question {
    pub fn correct_option(&self) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.is_correct)
    }
}
