use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::candidate::Round;
use crate::models::quiz::{CandidateQuiz, CandidateQuizItem, OptionLabel};

pub const QUIZ_SUBMIT_PROMPT: &str = "Submit quiz answers? You can only submit once.";

/// Submission needs at least one question and an answer for each of the
/// questions the sheet showed.
pub fn can_submit(question_ids: &[String], answers: &BTreeMap<String, OptionLabel>) -> bool {
    !question_ids.is_empty() && question_ids.iter().all(|id| answers.contains_key(id))
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizSubmitRequest {
    /// Ids of the questions on the sheet being submitted.
    pub question_ids: Vec<String>,
    pub selected_answers: BTreeMap<String, OptionLabel>,
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizSheet {
    pub round: Option<Round>,
    pub items: Vec<CandidateQuizItem>,
    pub submit_prompt: &'static str,
}

impl From<CandidateQuiz> for QuizSheet {
    fn from(quiz: CandidateQuiz) -> Self {
        Self {
            round: quiz.round,
            items: quiz.items,
            submit_prompt: QUIZ_SUBMIT_PROMPT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_submit() {
        let items = vec!["q-1".to_string(), "q-2".to_string()];
        let mut answers = BTreeMap::new();
        answers.insert("q-1".to_string(), OptionLabel::B);
        assert!(!can_submit(&items, &answers));
        answers.insert("q-2".to_string(), OptionLabel::D);
        assert!(can_submit(&items, &answers));
        assert!(!can_submit(&[], &answers));
    }
}
