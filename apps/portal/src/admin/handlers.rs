use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::confirm::ConfirmationPrompt;
use super::console::{AdminConsole, ConsoleSnapshot, QuizDraft, RoundCodingRequest, ScoreForm};
use super::export::CsvDownload;
use super::jobs::JobDraft;
use super::pipeline::CandidateFilters;
use crate::api_client::admin::{AuditQuery, CandidateAction};
use crate::errors::AppError;
use crate::models::coding::CodingProblemDraft;
use crate::models::sub_admin::AdminCredentials;
use crate::state::AppState;

/// Header carrying the console session id returned by login.
pub const SESSION_HEADER: &str = "x-console-session";

/// The caller's console, resolved from [`SESSION_HEADER`].
pub struct Console(pub Uuid, pub Arc<AdminConsole>);

#[async_trait]
impl FromRequestParts<AppState> for Console {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .ok_or(AppError::Unauthorized)?;
        let console = state.consoles.get(id).await?;
        Ok(Console(id, console))
    }
}

type Snapshot = Result<Json<ConsoleSnapshot>, AppError>;

async fn snapshot(console: &AdminConsole) -> Snapshot {
    Ok(Json(console.snapshot().await))
}

fn pending(prompt: ConfirmationPrompt) -> (StatusCode, Json<ConfirmationPrompt>) {
    (StatusCode::ACCEPTED, Json(prompt))
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub session: Uuid,
    pub console: ConsoleSnapshot,
}

/// POST /console/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(credentials): Json<AdminCredentials>,
) -> Result<(StatusCode, Json<LoginResponse>), AppError> {
    if credentials.username.trim().is_empty() || credentials.password.is_empty() {
        return Err(AppError::Validation(
            "Username and password are required".to_string(),
        ));
    }
    let console = AdminConsole::login(state.api.clone(), &credentials)
        .await
        .map_err(|e| AppError::upstream(e, "Login failed"))?;
    console.load_all().await;
    let (session, console) = state.consoles.open(console).await;
    Ok((
        StatusCode::CREATED,
        Json(LoginResponse {
            session,
            console: console.snapshot().await,
        }),
    ))
}

/// POST /console/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    Console(id, _): Console,
) -> StatusCode {
    state.consoles.close(id).await;
    StatusCode::NO_CONTENT
}

/// GET /console
pub async fn handle_snapshot(Console(_, console): Console) -> Snapshot {
    snapshot(&console).await
}

/// POST /console/refresh
pub async fn handle_refresh(Console(_, console): Console) -> Snapshot {
    console.load_all().await;
    snapshot(&console).await
}

// ── Confirmations ───────────────────────────────────────────────────────────

/// POST /console/confirmations/:token
pub async fn handle_confirm(Console(_, console): Console, Path(token): Path<Uuid>) -> Snapshot {
    console.confirm(token).await?;
    snapshot(&console).await
}

/// DELETE /console/confirmations/:token
pub async fn handle_cancel(Console(_, console): Console, Path(token): Path<Uuid>) -> StatusCode {
    if console.cancel(token).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

// ── Jobs ────────────────────────────────────────────────────────────────────

/// GET /console/jobs
pub async fn handle_load_jobs(Console(_, console): Console) -> Snapshot {
    console.load_jobs().await;
    snapshot(&console).await
}

/// POST /console/jobs
pub async fn handle_save_job(Console(_, console): Console, Json(draft): Json<JobDraft>) -> Snapshot {
    console.save_job(draft).await;
    snapshot(&console).await
}

/// POST /console/jobs/new
pub async fn handle_new_job(Console(_, console): Console) -> Snapshot {
    console.new_job_draft().await;
    snapshot(&console).await
}

/// POST /console/jobs/:id/select
pub async fn handle_select_job(Console(_, console): Console, Path(id): Path<String>) -> Snapshot {
    console.select_job(&id).await?;
    snapshot(&console).await
}

/// DELETE /console/jobs/:id
pub async fn handle_delete_job(Console(_, console): Console, Path(id): Path<String>) -> impl IntoResponse {
    pending(console.request_delete_job(&id).await)
}

// ── Candidates ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SelectionToggle {
    pub candidate_id: Option<String>,
    pub checked: bool,
}

#[derive(Deserialize)]
pub struct AssignRandom {
    #[serde(default)]
    pub candidate_ids: Vec<String>,
}

/// GET /console/candidates
pub async fn handle_load_candidates(Console(_, console): Console) -> Snapshot {
    console.load_candidates().await;
    snapshot(&console).await
}

/// POST /console/candidates (manual entry)
pub async fn handle_create_candidate(Console(_, console): Console, Json(body): Json<Value>) -> Snapshot {
    console.create_candidate(&body).await;
    snapshot(&console).await
}

/// PUT /console/candidates/filters
pub async fn handle_candidate_filters(
    Console(_, console): Console,
    Json(filters): Json<CandidateFilters>,
) -> Snapshot {
    console.set_candidate_filters(filters).await;
    snapshot(&console).await
}

/// POST /console/candidates/selection
/// Without a `candidate_id` the toggle applies to every visible row.
pub async fn handle_toggle_selection(
    Console(_, console): Console,
    Json(toggle): Json<SelectionToggle>,
) -> Snapshot {
    match toggle.candidate_id.as_deref() {
        Some(id) => console.toggle_candidate(id, toggle.checked).await,
        None => console.toggle_all_candidates(toggle.checked).await,
    }
    snapshot(&console).await
}

/// POST /console/candidates/:id/open
pub async fn handle_open_candidate(Console(_, console): Console, Path(id): Path<String>) -> Snapshot {
    console.open_candidate(&id).await?;
    snapshot(&console).await
}

/// POST /console/candidates/close
pub async fn handle_close_candidate(Console(_, console): Console) -> Snapshot {
    console.close_candidate().await;
    snapshot(&console).await
}

/// POST /console/candidates/score
pub async fn handle_submit_score(Console(_, console): Console, Json(form): Json<ScoreForm>) -> Snapshot {
    console.submit_score(form).await;
    snapshot(&console).await
}

/// POST /console/candidates/:id/actions
pub async fn handle_candidate_action(
    Console(_, console): Console,
    Path(id): Path<String>,
    Json(action): Json<CandidateAction>,
) -> impl IntoResponse {
    pending(console.request_candidate_action(&id, action).await)
}

/// POST /console/candidates/bulk
pub async fn handle_bulk_action(
    Console(_, console): Console,
    Json(action): Json<CandidateAction>,
) -> Result<impl IntoResponse, AppError> {
    Ok(pending(console.request_bulk_action(action).await?))
}

/// GET /console/candidates/export.csv
pub async fn handle_export_candidates(Console(_, console): Console) -> Result<CsvDownload, AppError> {
    console.export_candidates_csv().await
}

/// GET /console/rounds
pub async fn handle_load_rounds(Console(_, console): Console) -> Snapshot {
    console.load_rounds().await;
    snapshot(&console).await
}

// ── Quiz ────────────────────────────────────────────────────────────────────

/// GET /console/quiz
pub async fn handle_load_quiz(Console(_, console): Console) -> Snapshot {
    console.load_quiz().await;
    snapshot(&console).await
}

/// POST /console/quiz
pub async fn handle_create_quiz(Console(_, console): Console, Json(draft): Json<QuizDraft>) -> Snapshot {
    console.save_quiz_question(None, draft).await;
    snapshot(&console).await
}

/// PUT /console/quiz/:id
pub async fn handle_update_quiz(
    Console(_, console): Console,
    Path(id): Path<String>,
    Json(draft): Json<QuizDraft>,
) -> Snapshot {
    console.save_quiz_question(Some(&id), draft).await;
    snapshot(&console).await
}

/// POST /console/quiz/:id/select
pub async fn handle_select_quiz(Console(_, console): Console, Path(id): Path<String>) -> Snapshot {
    console.select_quiz_question(&id).await?;
    snapshot(&console).await
}

/// DELETE /console/quiz/:id
pub async fn handle_delete_quiz(Console(_, console): Console, Path(id): Path<String>) -> impl IntoResponse {
    pending(console.request_delete_quiz_question(&id).await)
}

// ── Coding ──────────────────────────────────────────────────────────────────

/// GET /console/coding
pub async fn handle_load_coding(Console(_, console): Console) -> Snapshot {
    console.load_coding().await;
    snapshot(&console).await
}

/// POST /console/coding/templates
pub async fn handle_create_template(Console(_, console): Console, Json(body): Json<Value>) -> Snapshot {
    console.create_coding_template(&body).await;
    snapshot(&console).await
}

/// POST /console/coding/problems
pub async fn handle_create_problem(
    Console(_, console): Console,
    Json(draft): Json<CodingProblemDraft>,
) -> Snapshot {
    console.create_coding_problem(draft).await;
    snapshot(&console).await
}

/// POST /console/coding/problems/:id/select
pub async fn handle_select_problem(Console(_, console): Console, Path(id): Path<String>) -> Snapshot {
    console.select_coding_problem(&id).await?;
    snapshot(&console).await
}

/// PUT /console/coding/rounds
pub async fn handle_round_coding(
    Console(_, console): Console,
    Json(request): Json<RoundCodingRequest>,
) -> Snapshot {
    console.set_round_coding(request).await;
    snapshot(&console).await
}

/// POST /console/coding/assign-random
pub async fn handle_assign_random(
    Console(_, console): Console,
    Json(body): Json<AssignRandom>,
) -> Snapshot {
    console.assign_random_problem(body.candidate_ids).await;
    snapshot(&console).await
}

/// GET /console/coding/assignments
pub async fn handle_load_assignments(Console(_, console): Console) -> Snapshot {
    console.load_coding_assignments().await;
    snapshot(&console).await
}

/// DELETE /console/coding/assignments
pub async fn handle_remove_assignments(Console(_, console): Console) -> impl IntoResponse {
    pending(console.request_remove_all_assignments().await)
}

/// GET /console/coding/submissions
pub async fn handle_load_submissions(Console(_, console): Console) -> Snapshot {
    console.load_coding_submissions().await;
    snapshot(&console).await
}

/// GET /console/coding/submissions/:id
pub async fn handle_open_submission(Console(_, console): Console, Path(id): Path<String>) -> Snapshot {
    console.open_coding_submission(&id).await;
    snapshot(&console).await
}

// ── Applications & audit ────────────────────────────────────────────────────

/// GET /console/applications
pub async fn handle_load_applications(Console(_, console): Console) -> Snapshot {
    console.load_applications().await;
    snapshot(&console).await
}

/// GET /console/applications/:id
pub async fn handle_open_application(Console(_, console): Console, Path(id): Path<String>) -> Snapshot {
    console.open_application(&id).await;
    snapshot(&console).await
}

/// POST /console/applications/close
pub async fn handle_close_application(Console(_, console): Console) -> Snapshot {
    console.close_application().await;
    snapshot(&console).await
}

/// GET /console/applications/export.csv
pub async fn handle_export_applications(Console(_, console): Console) -> Result<CsvDownload, AppError> {
    console.export_applications_csv().await
}

/// GET /console/audit
pub async fn handle_load_audit(Console(_, console): Console) -> Snapshot {
    console.load_audit().await;
    snapshot(&console).await
}

/// PUT /console/audit/filters
pub async fn handle_audit_filters(Console(_, console): Console, Json(query): Json<AuditQuery>) -> Snapshot {
    console.set_audit_filters(query).await;
    snapshot(&console).await
}

// ── Sub-admins ──────────────────────────────────────────────────────────────

/// GET /console/admins
pub async fn handle_load_admins(Console(_, console): Console) -> Snapshot {
    console.reload_admins().await?;
    snapshot(&console).await
}

/// POST /console/admins
pub async fn handle_create_admin(
    Console(_, console): Console,
    Json(credentials): Json<AdminCredentials>,
) -> Snapshot {
    console.create_sub_admin(credentials).await?;
    snapshot(&console).await
}

/// POST /console/admins/:username/disable
pub async fn handle_disable_admin(
    Console(_, console): Console,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(pending(console.request_disable_sub_admin(&username).await?))
}

/// DELETE /console/admins/:username
pub async fn handle_delete_admin(
    Console(_, console): Console,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(pending(console.request_delete_sub_admin(&username).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_snapshot))
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/refresh", post(handle_refresh))
        .route(
            "/confirmations/:token",
            post(handle_confirm).delete(handle_cancel),
        )
        .route("/jobs", get(handle_load_jobs).post(handle_save_job))
        .route("/jobs/new", post(handle_new_job))
        .route("/jobs/:id", delete(handle_delete_job))
        .route("/jobs/:id/select", post(handle_select_job))
        .route(
            "/candidates",
            get(handle_load_candidates).post(handle_create_candidate),
        )
        .route("/candidates/filters", put(handle_candidate_filters))
        .route("/candidates/selection", post(handle_toggle_selection))
        .route("/candidates/close", post(handle_close_candidate))
        .route("/candidates/score", post(handle_submit_score))
        .route("/candidates/bulk", post(handle_bulk_action))
        .route("/candidates/export.csv", get(handle_export_candidates))
        .route("/candidates/:id/open", post(handle_open_candidate))
        .route("/candidates/:id/actions", post(handle_candidate_action))
        .route("/rounds", get(handle_load_rounds))
        .route("/quiz", get(handle_load_quiz).post(handle_create_quiz))
        .route("/quiz/:id", put(handle_update_quiz).delete(handle_delete_quiz))
        .route("/quiz/:id/select", post(handle_select_quiz))
        .route("/coding", get(handle_load_coding))
        .route("/coding/templates", post(handle_create_template))
        .route("/coding/problems", post(handle_create_problem))
        .route("/coding/problems/:id/select", post(handle_select_problem))
        .route("/coding/rounds", put(handle_round_coding))
        .route("/coding/assign-random", post(handle_assign_random))
        .route(
            "/coding/assignments",
            get(handle_load_assignments).delete(handle_remove_assignments),
        )
        .route("/coding/submissions", get(handle_load_submissions))
        .route("/coding/submissions/:id", get(handle_open_submission))
        .route("/applications", get(handle_load_applications))
        .route("/applications/close", post(handle_close_application))
        .route("/applications/export.csv", get(handle_export_applications))
        .route("/applications/:id", get(handle_open_application))
        .route("/audit", get(handle_load_audit))
        .route("/audit/filters", put(handle_audit_filters))
        .route("/admins", get(handle_load_admins).post(handle_create_admin))
        .route("/admins/:username", delete(handle_delete_admin))
        .route("/admins/:username/disable", post(handle_disable_admin))
}
