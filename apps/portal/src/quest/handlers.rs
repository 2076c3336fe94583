use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::catalog::{catalog, QuestCatalog};
use super::scoring::Persona;
use super::wizard::{Notice, ResumeMeta, Screen, SubmitStatus, Wizard, WizardAction, LAST_LEVEL};
use crate::errors::AppError;
use crate::models::application::ResumeUpload;
use crate::state::AppState;

const RESUME_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// The wizard plus everything derived from it.
#[derive(Debug, Serialize)]
pub struct QuestView {
    pub wizard: Wizard,
    pub persona: Persona,
    pub xp: u32,
    pub progress: u32,
    pub notice: Option<Notice>,
}

impl QuestView {
    fn new(wizard: Wizard, notice: Option<Notice>) -> Self {
        Self {
            persona: wizard.persona(),
            xp: wizard.xp(),
            progress: wizard.progress(),
            wizard,
            notice,
        }
    }
}

#[derive(Deserialize)]
pub struct NewQuestQuery {
    pub job: Option<String>,
}

#[derive(Deserialize)]
pub struct StepRequest {
    pub wizard: Wizard,
    pub action: WizardAction,
}

/// GET /quest/catalog
pub async fn handle_catalog() -> Json<QuestCatalog> {
    Json(catalog())
}

/// GET /quest/new?job=<slug>
pub async fn handle_new_quest(Query(query): Query<NewQuestQuery>) -> Json<QuestView> {
    Json(QuestView::new(Wizard::new(query.job), None))
}

/// POST /quest/step
pub async fn handle_step(Json(req): Json<StepRequest>) -> Json<QuestView> {
    let mut wizard = req.wizard;
    wizard.sanitize();
    let notice = wizard.apply(req.action);
    Json(QuestView::new(wizard, notice))
}

/// POST /quest/applications (multipart: `wizard` JSON + `resume` file)
///
/// Every level is re-validated here; the first failing level is sent back
/// with its errors and a 422.
pub async fn handle_submit(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<QuestView>), AppError> {
    let mut wizard: Option<Wizard> = None;
    let mut resume: Option<ResumeUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        match field.name() {
            Some("wizard") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;
                let parsed = serde_json::from_str(&text)
                    .map_err(|e| AppError::Validation(format!("Invalid wizard state: {e}")))?;
                wizard = Some(parsed);
            }
            Some("resume") => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let content_type = field.content_type().map(str::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;
                resume = Some(ResumeUpload {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            _ => {}
        }
    }

    let mut wizard = wizard.ok_or_else(|| AppError::Validation("Missing wizard state".to_string()))?;
    wizard.sanitize();
    if wizard.screen != Screen::Wizard || wizard.level != LAST_LEVEL {
        return Err(AppError::Validation(
            "Finish every level before submitting".to_string(),
        ));
    }

    // The browser's resume metadata is replaced by what was actually uploaded.
    wizard.form.resume = resume.as_ref().map(|file| ResumeMeta {
        file_name: file.file_name.clone(),
        size: Some(file.bytes.len() as u64),
    });

    if let Some((level, errors)) = wizard.validate_through(LAST_LEVEL - 1) {
        wizard.level = level;
        wizard.errors = errors;
        let notice = Notice {
            title: "Quest blocked".to_string(),
            description: format!("Level {level} needs attention before submitting."),
        };
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(QuestView::new(wizard, Some(notice))),
        ));
    }

    let Some(resume) = resume else {
        return Err(AppError::Validation("Resume is required".to_string()));
    };
    let notice = wizard.submit(&state.api, &resume).await;
    let status = match wizard.submit_state.status {
        SubmitStatus::Success => {
            info!(persona = %wizard.persona().label(), job = ?wizard.job_slug, "quest submitted");
            StatusCode::CREATED
        }
        SubmitStatus::Error => StatusCode::BAD_GATEWAY,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };
    Ok((status, Json(QuestView::new(wizard, notice))))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(handle_catalog))
        .route("/new", get(handle_new_quest))
        .route("/step", post(handle_step))
        .route(
            "/applications",
            post(handle_submit).layer(DefaultBodyLimit::max(RESUME_LIMIT_BYTES)),
        )
}
