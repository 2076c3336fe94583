//! Candidate self-service endpoints. All but login require the candidate token.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::models::candidate::CandidateMe;
use crate::models::coding::{CandidateCoding, CodeSubmission, RunOutcome};
use crate::models::quiz::{CandidateQuiz, QuizSubmission};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

impl ApiClient {
    /// POST /candidate/auth/login
    pub async fn candidate_login(&self, credentials: &CandidateCredentials) -> Result<String, ApiError> {
        let response: TokenResponse = self
            .send_json(self.post(&["candidate", "auth", "login"], None).json(credentials))
            .await?;
        Ok(response.token)
    }

    /// GET /candidate/me
    pub async fn candidate_me(&self, token: &str) -> Result<CandidateMe, ApiError> {
        self.send_json(self.get(&["candidate", "me"], Some(token))).await
    }

    /// GET /candidate/quiz
    pub async fn candidate_quiz(&self, token: &str) -> Result<CandidateQuiz, ApiError> {
        self.send_json(self.get(&["candidate", "quiz"], Some(token))).await
    }

    /// POST /candidate/quiz/submit
    pub async fn submit_candidate_quiz(
        &self,
        token: &str,
        submission: &QuizSubmission,
    ) -> Result<(), ApiError> {
        self.send_unit(self.post(&["candidate", "quiz", "submit"], Some(token)).json(submission))
            .await
    }

    /// GET /candidate/coding
    pub async fn candidate_coding(&self, token: &str) -> Result<CandidateCoding, ApiError> {
        self.send_json(self.get(&["candidate", "coding"], Some(token))).await
    }

    /// POST /candidate/coding/run
    pub async fn run_candidate_code(
        &self,
        token: &str,
        code: &CodeSubmission,
    ) -> Result<RunOutcome, ApiError> {
        self.send_json(self.post(&["candidate", "coding", "run"], Some(token)).json(code))
            .await
    }

    /// POST /candidate/coding/submit
    pub async fn submit_candidate_code(
        &self,
        token: &str,
        code: &CodeSubmission,
    ) -> Result<RunOutcome, ApiError> {
        self.send_json(self.post(&["candidate", "coding", "submit"], Some(token)).json(code))
            .await
    }
}
