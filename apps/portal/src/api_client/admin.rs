//! Admin console endpoints. Every call carries the admin bearer token.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{ApiClient, ApiError};
use crate::models::application::Application;
use crate::models::audit::AuditLogEntry;
use crate::models::candidate::{Candidate, EvaluationScore, FinalDecision, Round, ScoreSubmission};
use crate::models::coding::{
    CodingAssignment, CodingProblem, CodingProblemDraft, CodingSubmission, CodingTemplate,
    RoundCodingUpdate,
};
use crate::models::job::{Job, JobPayload};
use crate::models::quiz::{QuizQuestion, QuizQuestionPayload};
use crate::models::sub_admin::{AdminCredentials, SubAdmin};
use crate::models::{Items, Rows};

#[derive(Debug, Clone, Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Clone, Serialize)]
struct BulkRequest<'a> {
    candidate_ids: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    decision: Option<FinalDecision>,
}

/// Query filters for `GET /admin/audit-logs`; `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditQuery {
    pub action: Option<String>,
    pub job_slug: Option<String>,
}

/// Pipeline actions on one or many candidates.
/// Serialized as `{"action": "finalize", "decision": "Selected"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "decision", rename_all = "snake_case")]
pub enum CandidateAction {
    Promote,
    Reject,
    Finalize(FinalDecision),
    Delete,
}

impl CandidateAction {
    fn bulk_path(self) -> &'static str {
        match self {
            CandidateAction::Promote => "bulk-promote",
            CandidateAction::Reject => "bulk-reject",
            CandidateAction::Finalize(_) => "bulk-finalize",
            CandidateAction::Delete => "bulk-delete",
        }
    }
}

impl ApiClient {
    /// POST /admin/login
    pub async fn admin_login(&self, credentials: &AdminCredentials) -> Result<String, ApiError> {
        let response: LoginResponse = self
            .send_json(self.post(&["admin", "login"], None).json(credentials))
            .await?;
        Ok(response.token)
    }

    // ── Jobs ────────────────────────────────────────────────────────────────

    /// GET /admin/jobs
    pub async fn admin_jobs(&self, token: &str) -> Result<Vec<Job>, ApiError> {
        let page: Items<Job> = self.send_json(self.get(&["admin", "jobs"], Some(token))).await?;
        Ok(page.items)
    }

    /// POST /admin/jobs
    pub async fn create_job(&self, token: &str, payload: &JobPayload) -> Result<Job, ApiError> {
        self.send_json(self.post(&["admin", "jobs"], Some(token)).json(payload))
            .await
    }

    /// PUT /admin/jobs/:id
    pub async fn update_job(
        &self,
        token: &str,
        job_id: &str,
        payload: &JobPayload,
    ) -> Result<Job, ApiError> {
        self.send_json(self.put(&["admin", "jobs", job_id], Some(token)).json(payload))
            .await
    }

    /// DELETE /admin/jobs/:id
    pub async fn delete_job(&self, token: &str, job_id: &str) -> Result<(), ApiError> {
        self.send_unit(self.delete(&["admin", "jobs", job_id], Some(token)))
            .await
    }

    // ── Applications ────────────────────────────────────────────────────────

    /// GET /admin/applications
    pub async fn admin_applications(&self, token: &str) -> Result<Vec<Application>, ApiError> {
        let page: Items<Application> = self
            .send_json(self.get(&["admin", "applications"], Some(token)))
            .await?;
        Ok(page.items)
    }

    /// GET /admin/applications/:id
    pub async fn admin_application(&self, token: &str, id: &str) -> Result<Application, ApiError> {
        self.send_json(self.get(&["admin", "applications", id], Some(token)))
            .await
    }

    /// GET /admin/export.csv
    pub async fn export_applications_csv(&self, token: &str) -> Result<Bytes, ApiError> {
        self.send_bytes(self.get(&["admin", "export.csv"], Some(token)))
            .await
    }

    // ── Candidates ──────────────────────────────────────────────────────────

    /// GET /admin/candidates[?job_slug=]
    pub async fn admin_candidates(
        &self,
        token: &str,
        job_slug: Option<&str>,
    ) -> Result<Vec<Candidate>, ApiError> {
        let mut request = self.get(&["admin", "candidates"], Some(token));
        if let Some(slug) = job_slug {
            request = request.query(&[("job_slug", slug)]);
        }
        let page: Items<Candidate> = self.send_json(request).await?;
        Ok(page.items)
    }

    /// GET /admin/candidates/export.csv[?job_slug=]
    pub async fn export_candidates_csv(
        &self,
        token: &str,
        job_slug: Option<&str>,
    ) -> Result<Bytes, ApiError> {
        let mut request = self.get(&["admin", "candidates", "export.csv"], Some(token));
        if let Some(slug) = job_slug {
            request = request.query(&[("job_slug", slug)]);
        }
        self.send_bytes(request).await
    }

    /// POST /admin/candidates (manual candidate entry)
    pub async fn create_candidate(&self, token: &str, candidate: &Value) -> Result<Candidate, ApiError> {
        self.send_json(self.post(&["admin", "candidates"], Some(token)).json(candidate))
            .await
    }

    /// POST /admin/candidates/:id/score
    pub async fn score_candidate(&self, token: &str, score: &ScoreSubmission) -> Result<(), ApiError> {
        self.send_unit(
            self.post(&["admin", "candidates", score.candidate_id.as_str(), "score"], Some(token))
                .json(score),
        )
        .await
    }

    /// POST /admin/candidates/:id/promote
    pub async fn promote_candidate(&self, token: &str, candidate_id: &str) -> Result<(), ApiError> {
        self.send_unit(
            self.post(&["admin", "candidates", candidate_id, "promote"], Some(token))
                .json(&json!({})),
        )
        .await
    }

    /// POST /admin/candidates/:id/reject
    pub async fn reject_candidate(&self, token: &str, candidate_id: &str) -> Result<(), ApiError> {
        self.send_unit(
            self.post(&["admin", "candidates", candidate_id, "reject"], Some(token))
                .json(&json!({})),
        )
        .await
    }

    /// POST /admin/candidates/:id/finalize
    pub async fn finalize_candidate(
        &self,
        token: &str,
        candidate_id: &str,
        decision: FinalDecision,
    ) -> Result<(), ApiError> {
        self.send_unit(
            self.post(&["admin", "candidates", candidate_id, "finalize"], Some(token))
                .json(&json!({ "decision": decision })),
        )
        .await
    }

    /// POST /admin/candidates/bulk-{promote,reject,finalize,delete}
    pub async fn bulk_candidates(
        &self,
        token: &str,
        action: CandidateAction,
        candidate_ids: &[String],
    ) -> Result<(), ApiError> {
        let decision = match action {
            CandidateAction::Finalize(decision) => Some(decision),
            _ => None,
        };
        let body = BulkRequest {
            candidate_ids,
            decision,
        };
        self.send_unit(
            self.post(&["admin", "candidates", action.bulk_path()], Some(token))
                .json(&body),
        )
        .await
    }

    /// GET /admin/candidates/:id/scores
    pub async fn candidate_scores(
        &self,
        token: &str,
        candidate_id: &str,
    ) -> Result<Vec<EvaluationScore>, ApiError> {
        let page: Items<EvaluationScore> = self
            .send_json(self.get(&["admin", "candidates", candidate_id, "scores"], Some(token)))
            .await?;
        Ok(page.items)
    }

    /// GET /admin/rounds
    pub async fn admin_rounds(&self, token: &str) -> Result<Vec<Round>, ApiError> {
        let page: Items<Round> = self.send_json(self.get(&["admin", "rounds"], Some(token))).await?;
        Ok(page.items)
    }

    // ── Quiz questions ──────────────────────────────────────────────────────

    /// GET /admin/quiz-questions?round_id=
    pub async fn quiz_questions(&self, token: &str, round_id: &str) -> Result<Vec<QuizQuestion>, ApiError> {
        let page: Items<QuizQuestion> = self
            .send_json(
                self.get(&["admin", "quiz-questions"], Some(token))
                    .query(&[("round_id", round_id)]),
            )
            .await?;
        Ok(page.items)
    }

    /// POST /admin/quiz-questions
    pub async fn create_quiz_question(
        &self,
        token: &str,
        payload: &QuizQuestionPayload,
    ) -> Result<(), ApiError> {
        self.send_unit(self.post(&["admin", "quiz-questions"], Some(token)).json(payload))
            .await
    }

    /// PUT /admin/quiz-questions/:id
    pub async fn update_quiz_question(
        &self,
        token: &str,
        question_id: &str,
        payload: &QuizQuestionPayload,
    ) -> Result<(), ApiError> {
        self.send_unit(
            self.put(&["admin", "quiz-questions", question_id], Some(token))
                .json(payload),
        )
        .await
    }

    /// DELETE /admin/quiz-questions/:id
    pub async fn delete_quiz_question(&self, token: &str, question_id: &str) -> Result<(), ApiError> {
        self.send_unit(self.delete(&["admin", "quiz-questions", question_id], Some(token)))
            .await
    }

    // ── Coding ──────────────────────────────────────────────────────────────

    /// GET /admin/coding/templates
    pub async fn coding_templates(&self, token: &str) -> Result<Vec<CodingTemplate>, ApiError> {
        let page: Items<CodingTemplate> = self
            .send_json(self.get(&["admin", "coding", "templates"], Some(token)))
            .await?;
        Ok(page.items)
    }

    /// GET /admin/coding/problems
    pub async fn coding_problems(&self, token: &str) -> Result<Vec<CodingProblem>, ApiError> {
        let page: Items<CodingProblem> = self
            .send_json(self.get(&["admin", "coding", "problems"], Some(token)))
            .await?;
        Ok(page.items)
    }

    /// POST /admin/coding/templates
    pub async fn create_coding_template(&self, token: &str, template: &Value) -> Result<(), ApiError> {
        self.send_unit(
            self.post(&["admin", "coding", "templates"], Some(token))
                .json(template),
        )
        .await
    }

    /// POST /admin/coding/problems
    pub async fn create_coding_problem(
        &self,
        token: &str,
        draft: &CodingProblemDraft,
    ) -> Result<(), ApiError> {
        self.send_unit(self.post(&["admin", "coding", "problems"], Some(token)).json(draft))
            .await
    }

    /// PUT /admin/rounds/:id/coding
    pub async fn set_round_coding(
        &self,
        token: &str,
        round_id: &str,
        update: &RoundCodingUpdate,
    ) -> Result<(), ApiError> {
        self.send_unit(
            self.put(&["admin", "rounds", round_id, "coding"], Some(token))
                .json(update),
        )
        .await
    }

    /// POST /admin/coding/assign-random-problem
    pub async fn assign_random_problem(
        &self,
        token: &str,
        candidate_ids: &[String],
    ) -> Result<Value, ApiError> {
        self.send_json(
            self.post(&["admin", "coding", "assign-random-problem"], Some(token))
                .json(&json!({ "candidate_ids": candidate_ids })),
        )
        .await
    }

    /// POST /admin/coding/remove-all-assignments
    pub async fn remove_all_assignments(&self, token: &str) -> Result<Value, ApiError> {
        self.send_json(
            self.post(&["admin", "coding", "remove-all-assignments"], Some(token))
                .json(&json!({})),
        )
        .await
    }

    /// GET /admin/coding/candidate-assignments
    pub async fn coding_assignments(&self, token: &str) -> Result<Vec<CodingAssignment>, ApiError> {
        let page: Items<CodingAssignment> = self
            .send_json(self.get(&["admin", "coding", "candidate-assignments"], Some(token)))
            .await?;
        Ok(page.items)
    }

    /// GET /admin/coding/submissions
    pub async fn coding_submissions(&self, token: &str) -> Result<Vec<CodingSubmission>, ApiError> {
        let page: Items<CodingSubmission> = self
            .send_json(self.get(&["admin", "coding", "submissions"], Some(token)))
            .await?;
        Ok(page.items)
    }

    /// GET /admin/coding/submissions/:id
    pub async fn coding_submission(
        &self,
        token: &str,
        submission_id: &str,
    ) -> Result<CodingSubmission, ApiError> {
        self.send_json(self.get(&["admin", "coding", "submissions", submission_id], Some(token)))
            .await
    }

    // ── Sub-admins ──────────────────────────────────────────────────────────

    /// GET /admin/sub-admins
    pub async fn sub_admins(&self, token: &str) -> Result<Vec<SubAdmin>, ApiError> {
        let rows: Rows<SubAdmin> = self
            .send_json(self.get(&["admin", "sub-admins"], Some(token)))
            .await?;
        Ok(rows.0)
    }

    /// POST /admin/sub-admins
    pub async fn create_sub_admin(&self, token: &str, credentials: &AdminCredentials) -> Result<(), ApiError> {
        self.send_unit(self.post(&["admin", "sub-admins"], Some(token)).json(credentials))
            .await
    }

    /// POST /admin/sub-admins/:username/disable
    pub async fn disable_sub_admin(&self, token: &str, username: &str) -> Result<(), ApiError> {
        self.send_unit(
            self.post(&["admin", "sub-admins", username, "disable"], Some(token))
                .json(&json!({})),
        )
        .await
    }

    /// DELETE /admin/sub-admins/:username
    pub async fn delete_sub_admin(&self, token: &str, username: &str) -> Result<(), ApiError> {
        self.send_unit(self.delete(&["admin", "sub-admins", username], Some(token)))
            .await
    }

    // ── Audit ───────────────────────────────────────────────────────────────

    /// GET /admin/audit-logs[?action=&job_slug=]
    pub async fn audit_logs(&self, token: &str, query: &AuditQuery) -> Result<Vec<AuditLogEntry>, ApiError> {
        let mut params = Vec::new();
        if let Some(action) = &query.action {
            params.push(("action", action.as_str()));
        }
        if let Some(slug) = &query.job_slug {
            params.push(("job_slug", slug.as_str()));
        }
        let page: Items<AuditLogEntry> = self
            .send_json(self.get(&["admin", "audit-logs"], Some(token)).query(&params))
            .await?;
        Ok(page.items)
    }
}
