use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use super::{published_cards, JobCard, JobDetail};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Result<Json<Vec<JobCard>>, AppError> {
    let jobs = state
        .api
        .public_jobs()
        .await
        .map_err(|e| AppError::upstream(e, "Failed to load jobs"))?;
    Ok(Json(published_cards(&jobs)))
}

/// GET /jobs/:slug
pub async fn handle_job_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<JobDetail>, AppError> {
    let job = state
        .api
        .public_job(&slug)
        .await
        .map_err(|e| AppError::upstream(e, "Job not found"))?;
    if !job.is_published {
        return Err(AppError::NotFound(format!("Job {slug} not found")));
    }
    Ok(Json(JobDetail::from(&job)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_list_jobs))
        .route("/:slug", get(handle_job_detail))
}
