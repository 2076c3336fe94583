//! Server-held admin console: one per signed-in admin, keyed by session id.
//!
//! Panel state lives behind a mutex that is only held for bookkeeping. Every
//! backend call happens with the lock released: begin a ticket, unlock,
//! await, relock, finish the ticket.

mod applications;
mod candidates;
mod coding;
mod jobs;
mod quiz;
mod sub_admins;

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;
use uuid::Uuid;

pub use applications::AuditPanel;
pub use candidates::ScoreForm;
pub use coding::{CodingPanel, RoundCodingRequest};
pub use quiz::QuizDraft;

use super::confirm::{ConfirmationPrompt, Confirmations};
use super::jobs::JobDraft;
use super::panel::PanelState;
use super::pipeline::CandidatePipeline;
use super::role::AdminRole;
use crate::api_client::admin::CandidateAction;
use crate::api_client::{ApiClient, ApiError};
use crate::errors::AppError;
use crate::models::application::Application;
use crate::models::candidate::{EvaluationScore, Round};
use crate::models::job::Job;
use crate::models::quiz::QuizQuestion;
use crate::models::sub_admin::{AdminCredentials, SubAdmin};

/// A destructive action parked until the admin confirms it.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleAction {
    DeleteJob { job_id: String },
    Candidate { candidate_id: String, action: CandidateAction },
    Bulk { candidate_ids: Vec<String>, action: CandidateAction },
    DeleteQuizQuestion { question_id: String },
    RemoveAllAssignments,
    DisableSubAdmin { username: String },
    DeleteSubAdmin { username: String },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsoleState {
    pub jobs: PanelState<Job>,
    pub job_draft: JobDraft,
    pub candidates: CandidatePipeline,
    pub scores: PanelState<EvaluationScore>,
    pub rounds: PanelState<Round>,
    pub quiz: PanelState<QuizQuestion>,
    pub coding: CodingPanel,
    pub applications: PanelState<Application>,
    pub audit: AuditPanel,
    pub admins: PanelState<SubAdmin>,
    #[serde(skip)]
    confirmations: Confirmations<ConsoleAction>,
}

/// What the console endpoints return after every operation.
#[derive(Debug, Clone, Serialize)]
pub struct ConsoleSnapshot {
    pub username: String,
    pub role: AdminRole,
    pub role_label: &'static str,
    pub pending_confirmations: usize,
    /// Download link for the opened application's resume.
    pub resume_url: Option<String>,
    #[serde(flatten)]
    pub state: ConsoleState,
}

pub struct AdminConsole {
    api: ApiClient,
    token: String,
    username: String,
    role: AdminRole,
    state: Mutex<ConsoleState>,
    last_seen_ms: AtomicI64,
    closed: AtomicBool,
}

impl AdminConsole {
    pub fn new(api: ApiClient, token: String, username: String) -> Self {
        let role = AdminRole::from_token(&token);
        Self {
            api,
            token,
            username,
            role,
            state: Mutex::new(ConsoleState::default()),
            last_seen_ms: AtomicI64::new(Utc::now().timestamp_millis()),
            closed: AtomicBool::new(false),
        }
    }

    /// Exchanges credentials for a token and opens a console for it.
    pub async fn login(api: ApiClient, credentials: &AdminCredentials) -> Result<Self, ApiError> {
        let credentials = AdminCredentials {
            username: credentials.username.trim().to_string(),
            password: credentials.password.clone(),
        };
        let token = api.admin_login(&credentials).await?;
        let console = Self::new(api, token, credentials.username);
        info!(username = %console.username, role = ?console.role, "admin signed in");
        Ok(console)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn touch(&self, now: DateTime<Utc>) {
        self.last_seen_ms.store(now.timestamp_millis(), Ordering::Relaxed);
    }

    pub(crate) fn last_seen(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.last_seen_ms.load(Ordering::Relaxed))
            .single()
            .unwrap_or_else(Utc::now)
    }

    /// After closing, in-flight requests still finish but their results are
    /// discarded.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Relaxed);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }

    async fn lock(&self) -> MutexGuard<'_, ConsoleState> {
        self.state.lock().await
    }

    /// Writes a backend result back unless the console was closed meanwhile.
    async fn settle(&self, apply: impl FnOnce(&mut ConsoleState)) {
        if self.is_closed() {
            return;
        }
        let mut state = self.lock().await;
        apply(&mut state);
    }

    pub async fn snapshot(&self) -> ConsoleSnapshot {
        let state = self.lock().await.clone();
        let resume_url = state
            .applications
            .selected
            .as_ref()
            .map(|app| self.api.resume_url(&app.id));
        ConsoleSnapshot {
            username: self.username.clone(),
            role: self.role,
            role_label: self.role.label(),
            pending_confirmations: state.confirmations.pending_count(),
            resume_url,
            state,
        }
    }

    /// Initial load after sign-in. Panels load concurrently; the sub-admin
    /// panel only for super admins.
    pub async fn load_all(&self) {
        tokio::join!(
            self.load_jobs(),
            self.load_rounds(),
            self.load_candidates(),
            self.load_quiz(),
            self.load_coding(),
            self.load_applications(),
            self.load_audit(),
            async {
                if self.role.is_super() {
                    self.load_admins().await;
                }
            },
        );
    }

    async fn request_confirmation(&self, action: ConsoleAction, prompt: String) -> ConfirmationPrompt {
        self.lock()
            .await
            .confirmations
            .request(action, prompt, Utc::now())
    }

    /// Runs a parked action. Unknown or expired tokens are a 404.
    pub async fn confirm(&self, token: Uuid) -> Result<(), AppError> {
        let action = self
            .lock()
            .await
            .confirmations
            .take(token, Utc::now())
            .ok_or_else(|| AppError::NotFound("Confirmation expired or unknown".to_string()))?;

        match action {
            ConsoleAction::DeleteJob { job_id } => self.delete_job(&job_id).await,
            ConsoleAction::Candidate {
                candidate_id,
                action,
            } => self.run_candidate_action(&candidate_id, action).await,
            ConsoleAction::Bulk {
                candidate_ids,
                action,
            } => self.run_bulk_action(&candidate_ids, action).await,
            ConsoleAction::DeleteQuizQuestion { question_id } => {
                self.delete_quiz_question(&question_id).await
            }
            ConsoleAction::RemoveAllAssignments => self.remove_all_assignments().await,
            ConsoleAction::DisableSubAdmin { username } => self.disable_sub_admin(&username).await,
            ConsoleAction::DeleteSubAdmin { username } => self.delete_sub_admin(&username).await,
        }
        Ok(())
    }

    pub async fn cancel(&self, token: Uuid) -> bool {
        self.lock().await.confirmations.cancel(token)
    }
}
