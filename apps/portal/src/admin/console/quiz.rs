use serde::{Deserialize, Serialize};

use super::{AdminConsole, ConsoleAction};
use crate::admin::confirm::ConfirmationPrompt;
use crate::errors::AppError;
use crate::models::quiz::{OptionLabel, QuizOptions, QuizQuestionPayload, QUIZ_ROUND_ID};

/// Question editor contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizDraft {
    pub question_text: String,
    pub options: QuizOptions,
    pub correct_answer: OptionLabel,
}

impl QuizDraft {
    fn is_complete(&self) -> bool {
        let o = &self.options;
        [&self.question_text, &o.a, &o.b, &o.c, &o.d]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    fn payload(&self, round_id: Option<&str>) -> QuizQuestionPayload {
        QuizQuestionPayload {
            round_id: round_id.map(str::to_owned),
            question_text: self.question_text.trim().to_string(),
            options: self.options.clone(),
            correct_answer: self.correct_answer,
        }
    }
}

impl AdminConsole {
    pub async fn load_quiz(&self) {
        let ticket = self.lock().await.quiz.begin();
        let result = self
            .api
            .quiz_questions(&self.token, QUIZ_ROUND_ID)
            .await
            .map_err(|e| e.message("Failed to load quiz questions"));
        self.settle(|s| {
            s.quiz.finish_rows(ticket, result);
        })
        .await;
    }

    pub async fn select_quiz_question(&self, question_id: &str) -> Result<(), AppError> {
        if self
            .lock()
            .await
            .quiz
            .select_where(|q| q.question_id == question_id)
        {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Question {question_id} not found")))
        }
    }

    /// Creates a question when `question_id` is `None`, updates it otherwise.
    pub async fn save_quiz_question(&self, question_id: Option<&str>, draft: QuizDraft) {
        let ticket = {
            let mut state = self.lock().await;
            if !draft.is_complete() {
                state.quiz.fail("Fill in the question and all four options");
                return;
            }
            state.quiz.begin()
        };
        let result = match question_id {
            None => self
                .api
                .create_quiz_question(&self.token, &draft.payload(Some(QUIZ_ROUND_ID)))
                .await
                .map_err(|e| e.message("Failed to create question")),
            Some(id) => self
                .api
                .update_quiz_question(&self.token, id, &draft.payload(None))
                .await
                .map_err(|e| e.message("Failed to update question")),
        };
        match result {
            Ok(()) => self.load_quiz().await,
            Err(message) => {
                self.settle(|s| {
                    s.quiz.finish(ticket, Err(message));
                })
                .await
            }
        }
    }

    pub async fn request_delete_quiz_question(&self, question_id: &str) -> ConfirmationPrompt {
        self.request_confirmation(
            ConsoleAction::DeleteQuizQuestion {
                question_id: question_id.to_string(),
            },
            "Delete this question?".to_string(),
        )
        .await
    }

    pub(super) async fn delete_quiz_question(&self, question_id: &str) {
        let ticket = self.lock().await.quiz.begin();
        match self.api.delete_quiz_question(&self.token, question_id).await {
            Ok(()) => {
                self.settle(|s| s.quiz.select(None)).await;
                self.load_quiz().await;
            }
            Err(e) => {
                let message = e.message("Failed to delete question");
                self.settle(|s| {
                    s.quiz.finish(ticket, Err(message));
                })
                .await;
            }
        }
    }
}
