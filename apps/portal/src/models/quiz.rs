use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Quiz questions are authored for the quiz-enabled second round.
pub const QUIZ_ROUND_ID: &str = "round-2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum OptionLabel {
    #[default]
    A,
    B,
    C,
    D,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizOptions {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

/// A round-scoped multiple-choice question as seen by admins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizQuestion {
    pub question_id: String,
    pub round_id: String,
    pub question_text: String,
    pub options: QuizOptions,
    pub correct_answer: OptionLabel,
}

/// Body of `POST /admin/quiz-questions`; `round_id` is omitted on update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizQuestionPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_id: Option<String>,
    pub question_text: String,
    pub options: QuizOptions,
    pub correct_answer: OptionLabel,
}

/// A question as served to candidates: no correct answer attached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateQuizItem {
    pub question_id: String,
    pub question_text: String,
    pub options: QuizOptions,
}

/// `GET /candidate/quiz` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateQuiz {
    pub round: Option<super::candidate::Round>,
    pub items: Vec<CandidateQuizItem>,
}

/// Body of `POST /candidate/quiz/submit`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizSubmission {
    pub selected_answers: BTreeMap<String, OptionLabel>,
}
