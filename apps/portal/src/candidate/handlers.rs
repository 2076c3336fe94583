use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::info;

use super::coding::{CodeRequest, CodingView, LanguageSwitch, Workspace, CODE_SUBMIT_PROMPT};
use super::portal::PortalView;
use super::quiz::{can_submit, QuizSheet, QuizSubmitRequest, QUIZ_SUBMIT_PROMPT};
use super::session::{clear_token_cookie, set_token_cookie, CandidateToken};
use crate::api_client::candidate::CandidateCredentials;
use crate::errors::AppError;
use crate::models::coding::CodeSubmission;
use crate::models::quiz::QuizSubmission;
use crate::state::AppState;

/// Where task pages send visitors without a token.
const PORTAL_PATH: &str = "/candidate";

/// POST /candidate/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(credentials): Json<CandidateCredentials>,
) -> Result<Response, AppError> {
    let token = state
        .api
        .candidate_login(&credentials)
        .await
        .map_err(|e| AppError::upstream(e, "Login failed"))?;
    info!("candidate signed in");
    Ok((
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, set_token_cookie(&token))],
    )
        .into_response())
}

/// POST /candidate/logout
pub async fn handle_logout() -> Response {
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, clear_token_cookie())],
    )
        .into_response()
}

/// GET /candidate/portal
pub async fn handle_portal(
    State(state): State<AppState>,
    CandidateToken(token): CandidateToken,
) -> Result<Json<PortalView>, AppError> {
    let me = state
        .api
        .candidate_me(&token)
        .await
        .map_err(|e| AppError::upstream(e, "Failed to load portal"))?;
    Ok(Json(PortalView::from(me)))
}

/// GET /candidate/quiz
pub async fn handle_quiz(
    State(state): State<AppState>,
    token: Option<CandidateToken>,
) -> Result<Response, AppError> {
    let Some(CandidateToken(token)) = token else {
        return Ok(Redirect::to(PORTAL_PATH).into_response());
    };
    let quiz = state
        .api
        .candidate_quiz(&token)
        .await
        .map_err(|e| AppError::upstream_detail(e, "Failed to load quiz"))?;
    Ok(Json(QuizSheet::from(quiz)).into_response())
}

/// POST /candidate/quiz/submit
///
/// Needs `confirm: true` and an answer for every question id the sheet
/// listed. The backend still decides whether this is the single allowed
/// submission.
pub async fn handle_submit_quiz(
    State(state): State<AppState>,
    CandidateToken(token): CandidateToken,
    Json(req): Json<QuizSubmitRequest>,
) -> Result<StatusCode, AppError> {
    if !req.confirm {
        return Err(AppError::ConfirmationRequired(QUIZ_SUBMIT_PROMPT.to_string()));
    }
    if !can_submit(&req.question_ids, &req.selected_answers) {
        return Err(AppError::Validation(
            "Answer every question before submitting".to_string(),
        ));
    }
    state
        .api
        .submit_candidate_quiz(
            &token,
            &QuizSubmission {
                selected_answers: req.selected_answers,
            },
        )
        .await
        .map_err(|e| AppError::upstream_detail(e, "Submission failed"))?;
    info!("candidate quiz submitted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /candidate/coding
pub async fn handle_coding(
    State(state): State<AppState>,
    token: Option<CandidateToken>,
) -> Result<Response, AppError> {
    let Some(CandidateToken(token)) = token else {
        return Ok(Redirect::to(PORTAL_PATH).into_response());
    };
    let coding = state
        .api
        .candidate_coding(&token)
        .await
        .map_err(|e| AppError::upstream_detail(e, "Failed to load coding task"))?;
    Ok(Json(CodingView::from(coding)).into_response())
}

/// POST /candidate/coding/language
pub async fn handle_switch_language(
    State(state): State<AppState>,
    CandidateToken(token): CandidateToken,
    Json(req): Json<LanguageSwitch>,
) -> Result<Json<Workspace>, AppError> {
    let coding = state
        .api
        .candidate_coding(&token)
        .await
        .map_err(|e| AppError::upstream_detail(e, "Failed to load coding task"))?;
    let mut workspace = req.workspace;
    workspace.switch_language(req.language, coding.problem.as_ref());
    Ok(Json(workspace))
}

fn submission(req: CodeRequest) -> CodeSubmission {
    CodeSubmission {
        language: req.language.as_str().to_string(),
        code: req.code,
    }
}

/// POST /candidate/coding/run
pub async fn handle_run_code(
    State(state): State<AppState>,
    CandidateToken(token): CandidateToken,
    Json(req): Json<CodeRequest>,
) -> Result<Json<Value>, AppError> {
    let outcome = state
        .api
        .run_candidate_code(&token, &submission(req))
        .await
        .map_err(|e| AppError::upstream_detail(e, "Run failed"))?;
    Ok(Json(outcome))
}

/// POST /candidate/coding/submit
pub async fn handle_submit_code(
    State(state): State<AppState>,
    CandidateToken(token): CandidateToken,
    Json(req): Json<CodeRequest>,
) -> Result<Json<Value>, AppError> {
    if !req.confirm {
        return Err(AppError::ConfirmationRequired(CODE_SUBMIT_PROMPT.to_string()));
    }
    let outcome = state
        .api
        .submit_candidate_code(&token, &submission(req))
        .await
        .map_err(|e| AppError::upstream_detail(e, "Submit failed"))?;
    info!("candidate coding solution submitted");
    Ok(Json(outcome))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/portal", get(handle_portal))
        .route("/quiz", get(handle_quiz))
        .route("/quiz/submit", post(handle_submit_quiz))
        .route("/coding", get(handle_coding))
        .route("/coding/language", post(handle_switch_language))
        .route("/coding/run", post(handle_run_code))
        .route("/coding/submit", post(handle_submit_code))
}
