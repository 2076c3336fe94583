use serde::Deserialize;
use serde_json::Value;

use super::{AdminConsole, ConsoleAction};
use crate::admin::confirm::ConfirmationPrompt;
use crate::admin::export::{CsvDownload, ExportKind};
use crate::admin::pipeline::CandidateFilters;
use crate::api_client::admin::CandidateAction;
use crate::errors::AppError;
use crate::models::candidate::{EvaluationStatus, ScoreSubmission};

/// Evaluation form for the opened candidate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScoreForm {
    pub score: f64,
    pub evaluator_name: String,
    pub comments: String,
    pub status: EvaluationStatus,
}

fn single_prompt(action: CandidateAction, name: &str) -> String {
    match action {
        CandidateAction::Promote => format!("Promote {name} to the next stage?"),
        CandidateAction::Reject => format!("Reject {name}?"),
        CandidateAction::Finalize(decision) => format!("{} {name}?", decision.label()),
        CandidateAction::Delete => {
            format!("Delete {name}? Only Active/Rejected candidates can be deleted.")
        }
    }
}

fn bulk_prompt(action: CandidateAction, count: usize) -> String {
    match action {
        CandidateAction::Promote => format!("Promote {count} candidate(s) to the next stage?"),
        CandidateAction::Reject => format!("Reject {count} candidate(s)?"),
        CandidateAction::Finalize(decision) => {
            format!("{} {count} candidate(s)?", decision.label())
        }
        CandidateAction::Delete => format!(
            "Delete {count} candidate(s)? Only Active/Rejected candidates can be deleted."
        ),
    }
}

fn failure_fallback(action: CandidateAction, bulk: bool) -> &'static str {
    match (action, bulk) {
        (CandidateAction::Promote, false) => "Failed to promote",
        (CandidateAction::Reject, false) => "Failed to reject",
        (CandidateAction::Finalize(_), false) => "Failed to update candidate",
        (CandidateAction::Promote, true) => "Failed to bulk promote",
        (CandidateAction::Reject, true) => "Failed to bulk reject",
        (CandidateAction::Finalize(_), true) => "Failed to bulk finalize",
        (CandidateAction::Delete, _) => "Failed to delete candidates",
    }
}

impl AdminConsole {
    pub async fn load_candidates(&self) {
        let (ticket, job_slug) = {
            let mut state = self.lock().await;
            let ticket = state.candidates.panel.begin();
            (ticket, state.candidates.filters.job_slug.clone())
        };
        let result = self
            .api
            .admin_candidates(&self.token, job_slug.as_deref())
            .await
            .map_err(|e| e.message("Failed to load candidates"));
        self.settle(|s| {
            s.candidates.apply_listing(ticket, result);
        })
        .await;
    }

    pub async fn set_candidate_filters(&self, filters: CandidateFilters) {
        self.lock().await.candidates.filters = filters.normalized();
        self.load_candidates().await;
    }

    pub async fn toggle_candidate(&self, candidate_id: &str, checked: bool) {
        self.lock().await.candidates.toggle(candidate_id, checked);
    }

    pub async fn toggle_all_candidates(&self, checked: bool) {
        self.lock().await.candidates.toggle_all(checked);
    }

    /// Opens a candidate and loads their evaluation history.
    pub async fn open_candidate(&self, candidate_id: &str) -> Result<(), AppError> {
        {
            let mut state = self.lock().await;
            if !state.candidates.open(candidate_id) {
                return Err(AppError::NotFound(format!("Candidate {candidate_id} not found")));
            }
            state.scores = Default::default();
        }
        self.load_scores(candidate_id).await;
        Ok(())
    }

    pub async fn close_candidate(&self) {
        let mut state = self.lock().await;
        state.candidates.panel.select(None);
        state.scores = Default::default();
    }

    pub async fn load_scores(&self, candidate_id: &str) {
        let ticket = self.lock().await.scores.begin();
        let result = self
            .api
            .candidate_scores(&self.token, candidate_id)
            .await
            .map_err(|e| e.message("Failed to load scores"));
        self.settle(|s| {
            s.scores.finish_rows(ticket, result);
        })
        .await;
    }

    pub async fn load_rounds(&self) {
        let ticket = self.lock().await.rounds.begin();
        let result = self
            .api
            .admin_rounds(&self.token)
            .await
            .map_err(|e| e.message("Failed to load rounds"));
        self.settle(|s| {
            s.rounds.finish_rows(ticket, result);
        })
        .await;
    }

    /// Records an evaluation for the opened candidate, then refreshes both
    /// the list and the evaluation history.
    pub async fn submit_score(&self, form: ScoreForm) {
        let candidate_id = {
            let mut state = self.lock().await;
            let Some(id) = state.candidates.opened_id().map(str::to_owned) else {
                state.candidates.panel.fail("Open a candidate first");
                return;
            };
            if form.evaluator_name.trim().is_empty() {
                state.scores.fail("Evaluator name is required");
                return;
            }
            id
        };
        let submission = ScoreSubmission {
            candidate_id: candidate_id.clone(),
            score: form.score,
            evaluator_name: form.evaluator_name.trim().to_string(),
            comments: form.comments,
            status: form.status,
        };
        match self.api.score_candidate(&self.token, &submission).await {
            Ok(()) => {
                tokio::join!(self.load_candidates(), self.load_scores(&candidate_id));
            }
            Err(e) => {
                let message = e.message("Failed to submit score");
                self.settle(|s| s.scores.fail(message)).await;
            }
        }
    }

    pub async fn request_candidate_action(
        &self,
        candidate_id: &str,
        action: CandidateAction,
    ) -> ConfirmationPrompt {
        let name = self.lock().await.candidates.display_name(candidate_id);
        self.request_confirmation(
            ConsoleAction::Candidate {
                candidate_id: candidate_id.to_string(),
                action,
            },
            single_prompt(action, &name),
        )
        .await
    }

    /// Parks a bulk action over the current selection.
    pub async fn request_bulk_action(
        &self,
        action: CandidateAction,
    ) -> Result<ConfirmationPrompt, AppError> {
        let candidate_ids = self.lock().await.candidates.selection.clone();
        if candidate_ids.is_empty() {
            return Err(AppError::Validation("Select at least one candidate".to_string()));
        }
        let prompt = bulk_prompt(action, candidate_ids.len());
        Ok(self
            .request_confirmation(
                ConsoleAction::Bulk {
                    candidate_ids,
                    action,
                },
                prompt,
            )
            .await)
    }

    pub(super) async fn run_candidate_action(&self, candidate_id: &str, action: CandidateAction) {
        let detached = self.lock().await.candidates.detach(candidate_id);
        let token = self.token.as_str();
        let result = match action {
            CandidateAction::Promote => self.api.promote_candidate(token, candidate_id).await,
            CandidateAction::Reject => self.api.reject_candidate(token, candidate_id).await,
            CandidateAction::Finalize(decision) => {
                self.api.finalize_candidate(token, candidate_id, decision).await
            }
            CandidateAction::Delete => {
                self.api
                    .bulk_candidates(token, action, &[candidate_id.to_string()])
                    .await
            }
        };
        match result {
            Ok(()) => {
                self.settle(|s| s.candidates.panel.select(None)).await;
                self.load_candidates().await;
            }
            Err(e) => {
                let message = e.message(failure_fallback(action, false));
                self.settle(|s| {
                    s.candidates.reattach(detached);
                    s.candidates.panel.fail(message);
                })
                .await;
            }
        }
    }

    pub(super) async fn run_bulk_action(&self, candidate_ids: &[String], action: CandidateAction) {
        let taken = self.lock().await.candidates.take_selection();
        match self.api.bulk_candidates(&self.token, action, candidate_ids).await {
            Ok(()) => {
                self.settle(|s| s.candidates.panel.select(None)).await;
                self.load_candidates().await;
            }
            Err(e) => {
                let message = e.message(failure_fallback(action, true));
                self.settle(|s| {
                    s.candidates.restore_selection(taken);
                    s.candidates.panel.fail(message);
                })
                .await;
            }
        }
    }

    /// Manual candidate entry; the body is passed through as given.
    pub async fn create_candidate(&self, candidate: &Value) {
        match self.api.create_candidate(&self.token, candidate).await {
            Ok(_) => self.load_candidates().await,
            Err(e) => {
                let message = e.message("Failed to create candidate");
                self.settle(|s| s.candidates.panel.fail(message)).await;
            }
        }
    }

    /// CSV of the candidate list, honoring the job filter.
    pub async fn export_candidates_csv(&self) -> Result<CsvDownload, AppError> {
        let job_slug = self.lock().await.candidates.filters.job_slug.clone();
        let bytes = self
            .api
            .export_candidates_csv(&self.token, job_slug.as_deref())
            .await
            .map_err(|e| AppError::upstream(e, "Failed to export candidates"))?;
        Ok(CsvDownload::new(ExportKind::Candidates, bytes))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::super::testing::console_against;
    use super::*;
    use crate::models::candidate::FinalDecision;
    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    fn roster() -> Value {
        json!({"items": [
            {"candidate_id": "c-1", "full_name": "Asha", "status": "Active", "current_round": "round-1"},
            {"candidate_id": "c-2", "full_name": "Ravi", "status": "Active", "current_round": "round-2"},
            {"candidate_id": "c-3", "full_name": "Meera", "status": "Rejected", "current_round": "round-1"}
        ]})
    }

    fn router(bulk_status: StatusCode, calls: Arc<Mutex<Vec<String>>>) -> Router {
        let bulk_calls = calls.clone();
        Router::new()
            .route(
                "/api/admin/candidates",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    assert!(q.get("job_slug").map_or(true, |s| s == "campus-drive"));
                    Json(roster())
                }),
            )
            .route(
                "/api/admin/candidates/:id",
                post(move |Path(action): Path<String>, Json(body): Json<Value>| {
                    let calls = bulk_calls.clone();
                    async move {
                        calls.lock().unwrap().push(format!("{action} {body}"));
                        (bulk_status, Json(json!({"detail": "Only Active/Rejected candidates can be deleted"})))
                    }
                }),
            )
            .route(
                "/api/admin/candidates/:id/:op",
                post(move |Path((id, op)): Path<(String, String)>| {
                    let calls = calls.clone();
                    async move {
                        calls.lock().unwrap().push(format!("{op} {id}"));
                        if id == "c-3" {
                            (StatusCode::BAD_REQUEST, Json(json!({"detail": "Candidate already rejected"})))
                        } else {
                            (StatusCode::OK, Json(json!({})))
                        }
                    }
                }),
            )
            .route(
                "/api/admin/candidates/:id/scores",
                get(|| async { Json(json!({"items": [{"round_name": "Round 1", "score": 8.5, "status": "Pass"}]})) }),
            )
    }

    #[tokio::test]
    async fn test_bulk_failure_restores_selection() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let console = console_against(router(StatusCode::BAD_REQUEST, calls.clone()), "sub_admin").await;
        console.load_candidates().await;
        console.toggle_candidate("c-1", true).await;
        console.toggle_candidate("c-3", true).await;

        let prompt = console.request_bulk_action(CandidateAction::Delete).await.unwrap();
        assert_eq!(
            prompt.prompt,
            "Delete 2 candidate(s)? Only Active/Rejected candidates can be deleted."
        );
        console.confirm(prompt.token).await.unwrap();

        let snap = console.snapshot().await;
        assert_eq!(snap.state.candidates.selection, vec!["c-1".to_string(), "c-3".to_string()]);
        assert_eq!(
            snap.state.candidates.panel.error.as_deref(),
            Some("Only Active/Rejected candidates can be deleted")
        );
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_bulk_success_clears_selection_and_sends_decision() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let console = console_against(router(StatusCode::OK, calls.clone()), "sub_admin").await;
        console.load_candidates().await;
        console.toggle_all_candidates(true).await;

        let prompt = console
            .request_bulk_action(CandidateAction::Finalize(FinalDecision::Completed))
            .await
            .unwrap();
        assert_eq!(prompt.prompt, "Mark not selected 3 candidate(s)?");
        console.confirm(prompt.token).await.unwrap();

        let snap = console.snapshot().await;
        assert!(snap.state.candidates.selection.is_empty());
        let calls = calls.lock().unwrap();
        assert!(calls[0].starts_with("bulk-finalize"));
        assert!(calls[0].contains("\"decision\":\"Completed\""));
    }

    #[tokio::test]
    async fn test_bulk_needs_selection() {
        let console = console_against(Router::new(), "sub_admin").await;
        let err = console.request_bulk_action(CandidateAction::Promote).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_single_failure_reopens_candidate() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let console = console_against(router(StatusCode::OK, calls.clone()), "sub_admin").await;
        console.load_candidates().await;
        console.open_candidate("c-3").await.unwrap();

        let prompt = console.request_candidate_action("c-3", CandidateAction::Reject).await;
        assert_eq!(prompt.prompt, "Reject Meera?");
        console.confirm(prompt.token).await.unwrap();

        let snap = console.snapshot().await;
        assert_eq!(snap.state.candidates.opened_id(), Some("c-3"));
        assert_eq!(
            snap.state.candidates.panel.error.as_deref(),
            Some("Candidate already rejected")
        );
        assert_eq!(calls.lock().unwrap().as_slice(), ["reject c-3".to_string()]);
    }

    #[tokio::test]
    async fn test_single_success_clears_opened_candidate() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let console = console_against(router(StatusCode::OK, calls.clone()), "sub_admin").await;
        console.load_candidates().await;
        console.open_candidate("c-1").await.unwrap();
        assert_eq!(console.snapshot().await.state.scores.rows.len(), 1);

        let prompt = console.request_candidate_action("c-1", CandidateAction::Promote).await;
        assert_eq!(prompt.prompt, "Promote Asha to the next stage?");
        console.confirm(prompt.token).await.unwrap();

        let snap = console.snapshot().await;
        assert_eq!(snap.state.candidates.opened_id(), None);
        assert_eq!(snap.state.candidates.panel.error, None);
    }

    #[tokio::test]
    async fn test_filters_forward_job_and_filter_locally() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let console = console_against(router(StatusCode::OK, calls), "sub_admin").await;
        console
            .set_candidate_filters(CandidateFilters {
                job_slug: Some("campus-drive".into()),
                status: Some("Active".into()),
                round: Some("all".into()),
            })
            .await;
        let snap = console.snapshot().await;
        assert_eq!(snap.state.candidates.panel.rows.len(), 2);
        assert_eq!(snap.state.candidates.filters.round, None);
    }

    #[tokio::test]
    async fn test_score_requires_opened_candidate() {
        let console = console_against(Router::new(), "sub_admin").await;
        console
            .submit_score(ScoreForm {
                score: 7.0,
                evaluator_name: "Lead".into(),
                ..Default::default()
            })
            .await;
        let snap = console.snapshot().await;
        assert_eq!(
            snap.state.candidates.panel.error.as_deref(),
            Some("Open a candidate first")
        );
    }
}
