use super::{AdminConsole, ConsoleAction};
use crate::admin::confirm::ConfirmationPrompt;
use crate::admin::jobs::JobDraft;
use crate::errors::AppError;

impl AdminConsole {
    pub async fn load_jobs(&self) {
        let ticket = self.lock().await.jobs.begin();
        let result = self
            .api
            .admin_jobs(&self.token)
            .await
            .map_err(|e| e.message("Failed to load jobs"));
        self.settle(|s| {
            s.jobs.finish_rows(ticket, result);
        })
        .await;
    }

    /// Opens a posting in the editor.
    pub async fn select_job(&self, job_id: &str) -> Result<(), AppError> {
        let mut state = self.lock().await;
        if !state.jobs.select_where(|job| job.id == job_id) {
            return Err(AppError::NotFound(format!("Job {job_id} not found")));
        }
        state.job_draft = state
            .jobs
            .selected
            .as_ref()
            .map(JobDraft::from_job)
            .unwrap_or_default();
        Ok(())
    }

    pub async fn new_job_draft(&self) {
        let mut state = self.lock().await;
        state.jobs.select(None);
        state.job_draft = JobDraft::default();
    }

    /// Creates the posting when the draft has no id, updates it otherwise.
    /// On success the list is reloaded and the saved posting selected.
    pub async fn save_job(&self, draft: JobDraft) {
        let payload = draft.payload();
        let ticket = {
            let mut state = self.lock().await;
            state.job_draft = draft.clone();
            if payload.title.is_empty() {
                state.jobs.fail("Title is required");
                return;
            }
            state.jobs.begin()
        };

        let result = match draft.id.as_deref() {
            None => self
                .api
                .create_job(&self.token, &payload)
                .await
                .map_err(|e| e.message("Failed to create job")),
            Some(id) => self
                .api
                .update_job(&self.token, id, &payload)
                .await
                .map_err(|e| e.message("Failed to update job")),
        };

        match result {
            Ok(job) => {
                self.load_jobs().await;
                self.settle(|s| {
                    if !s.jobs.select_where(|row| row.id == job.id) {
                        s.jobs.select(Some(job.clone()));
                    }
                    s.job_draft = JobDraft::from_job(&job);
                })
                .await;
            }
            Err(message) => {
                self.settle(|s| {
                    s.jobs.finish(ticket, Err(message));
                })
                .await;
            }
        }
    }

    pub async fn request_delete_job(&self, job_id: &str) -> ConfirmationPrompt {
        self.request_confirmation(
            ConsoleAction::DeleteJob {
                job_id: job_id.to_string(),
            },
            "Delete this job posting?".to_string(),
        )
        .await
    }

    pub(super) async fn delete_job(&self, job_id: &str) {
        let ticket = self.lock().await.jobs.begin();
        match self.api.delete_job(&self.token, job_id).await {
            Ok(()) => {
                self.load_jobs().await;
                self.settle(|s| {
                    s.jobs.select(None);
                    s.job_draft = JobDraft::default();
                })
                .await;
            }
            Err(e) => {
                let message = e.message("Failed to delete job");
                self.settle(|s| {
                    s.jobs.finish(ticket, Err(message));
                })
                .await;
            }
        }
    }
}
