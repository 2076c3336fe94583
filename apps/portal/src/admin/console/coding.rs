use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AdminConsole, ConsoleAction};
use crate::admin::confirm::ConfirmationPrompt;
use crate::admin::panel::PanelState;
use crate::errors::AppError;
use crate::models::coding::{
    CodingAssignment, CodingProblem, CodingProblemDraft, CodingSubmission, CodingTemplate,
    RoundCodingUpdate,
};

#[derive(Debug, Clone, Default, Serialize)]
pub struct CodingPanel {
    pub templates: Vec<CodingTemplate>,
    /// `selected` is the problem the next round assignment uses.
    pub problems: PanelState<CodingProblem>,
    pub assignments: PanelState<CodingAssignment>,
    pub submissions: PanelState<CodingSubmission>,
    /// Backend summary of the last assign/remove run.
    pub last_result: Option<Value>,
}

/// Turns coding on (with the selected problem) or off for a round.
#[derive(Debug, Clone, Deserialize)]
pub struct RoundCodingRequest {
    pub round_id: String,
    pub enabled: bool,
}

impl AdminConsole {
    /// Templates and problems load together under the problems status.
    pub async fn load_coding(&self) {
        let ticket = self.lock().await.coding.problems.begin();
        let result = tokio::try_join!(
            self.api.coding_templates(&self.token),
            self.api.coding_problems(&self.token),
        )
        .map_err(|e| e.message("Failed to load coding problems"));
        self.settle(|s| {
            let problems = result.map(|(templates, problems)| {
                s.coding.templates = templates;
                problems
            });
            s.coding.problems.finish_rows(ticket, problems);
        })
        .await;
    }

    pub async fn create_coding_template(&self, template: &Value) {
        match self.api.create_coding_template(&self.token, template).await {
            Ok(()) => self.load_coding().await,
            Err(e) => {
                let message = e.message("Failed to create template");
                self.settle(|s| s.coding.problems.fail(message)).await;
            }
        }
    }

    pub async fn create_coding_problem(&self, draft: CodingProblemDraft) {
        if draft.template_id.trim().is_empty() {
            self.lock().await.coding.problems.fail("Pick a template first");
            return;
        }
        match self.api.create_coding_problem(&self.token, &draft).await {
            Ok(()) => self.load_coding().await,
            Err(e) => {
                let message = e.message("Failed to create problem");
                self.settle(|s| s.coding.problems.fail(message)).await;
            }
        }
    }

    pub async fn select_coding_problem(&self, problem_id: &str) -> Result<(), AppError> {
        if self
            .lock()
            .await
            .coding
            .problems
            .select_where(|p| p.problem_id == problem_id)
        {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Problem {problem_id} not found")))
        }
    }

    /// `PUT /admin/rounds/:id/coding`, then reloads rounds and coding.
    pub async fn set_round_coding(&self, request: RoundCodingRequest) {
        let coding_problem_id = if request.enabled {
            let mut state = self.lock().await;
            match state.coding.problems.selected.as_ref() {
                Some(problem) => Some(problem.problem_id.clone()),
                None => {
                    state.coding.problems.fail("Select a coding problem first");
                    return;
                }
            }
        } else {
            None
        };
        let update = RoundCodingUpdate {
            is_coding: request.enabled,
            coding_problem_id,
        };
        match self
            .api
            .set_round_coding(&self.token, &request.round_id, &update)
            .await
        {
            Ok(()) => {
                tokio::join!(self.load_rounds(), self.load_coding());
            }
            Err(e) => {
                let message = e.message("Failed to update round");
                self.settle(|s| s.coding.problems.fail(message)).await;
            }
        }
    }

    /// Assigns a random problem to the given candidates, or to the current
    /// candidate selection when none are given.
    pub async fn assign_random_problem(&self, candidate_ids: Vec<String>) {
        let candidate_ids = if candidate_ids.is_empty() {
            self.lock().await.candidates.selection.clone()
        } else {
            candidate_ids
        };
        if candidate_ids.is_empty() {
            self.lock()
                .await
                .coding
                .assignments
                .fail("Select at least one candidate");
            return;
        }
        match self.api.assign_random_problem(&self.token, &candidate_ids).await {
            Ok(summary) => {
                self.settle(|s| s.coding.last_result = Some(summary)).await;
                self.load_coding_assignments().await;
            }
            Err(e) => {
                let message = e.message("Failed to assign problems");
                self.settle(|s| s.coding.assignments.fail(message)).await;
            }
        }
    }

    pub async fn request_remove_all_assignments(&self) -> ConfirmationPrompt {
        self.request_confirmation(
            ConsoleAction::RemoveAllAssignments,
            "Remove every coding assignment?".to_string(),
        )
        .await
    }

    pub(super) async fn remove_all_assignments(&self) {
        match self.api.remove_all_assignments(&self.token).await {
            Ok(summary) => {
                self.settle(|s| s.coding.last_result = Some(summary)).await;
                self.load_coding_assignments().await;
            }
            Err(e) => {
                let message = e.message("Failed to remove assignments");
                self.settle(|s| s.coding.assignments.fail(message)).await;
            }
        }
    }

    pub async fn load_coding_assignments(&self) {
        let ticket = self.lock().await.coding.assignments.begin();
        let result = self
            .api
            .coding_assignments(&self.token)
            .await
            .map_err(|e| e.message("Failed to load assignments"));
        self.settle(|s| {
            s.coding.assignments.finish_rows(ticket, result);
        })
        .await;
    }

    pub async fn load_coding_submissions(&self) {
        let ticket = self.lock().await.coding.submissions.begin();
        let result = self
            .api
            .coding_submissions(&self.token)
            .await
            .map_err(|e| e.message("Failed to load submissions"));
        self.settle(|s| {
            s.coding.submissions.finish_rows(ticket, result);
        })
        .await;
    }

    pub async fn open_coding_submission(&self, submission_id: &str) {
        let ticket = self.lock().await.coding.submissions.begin();
        let result = self
            .api
            .coding_submission(&self.token, submission_id)
            .await
            .map_err(|e| e.message("Failed to load submission"));
        self.settle(|s| match result {
            Ok(submission) => {
                if s.coding.submissions.finish(ticket, Ok(())) {
                    s.coding.submissions.select(Some(submission));
                }
            }
            Err(message) => {
                s.coding.submissions.finish(ticket, Err(message));
            }
        })
        .await;
    }
}
