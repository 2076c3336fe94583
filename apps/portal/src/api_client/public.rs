//! Unauthenticated endpoints: the job board and Developer Quest submissions.

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use super::{ApiClient, ApiError};
use crate::models::application::{ApplicationPayload, ResumeUpload};
use crate::models::job::Job;
use crate::models::Items;

impl ApiClient {
    /// GET /jobs
    pub async fn public_jobs(&self) -> Result<Vec<Job>, ApiError> {
        let page: Items<Job> = self.send_json(self.get(&["jobs"], None)).await?;
        Ok(page.items)
    }

    /// GET /jobs/:slug
    pub async fn public_job(&self, slug: &str) -> Result<Job, ApiError> {
        self.send_json(self.get(&["jobs", slug], None)).await
    }

    /// POST /developer-applications (multipart: `payload` JSON + `resume` file)
    pub async fn post_application(
        &self,
        payload: &ApplicationPayload,
        resume: &ResumeUpload,
    ) -> Result<Value, ApiError> {
        let mut file = Part::bytes(resume.bytes.to_vec()).file_name(resume.file_name.clone());
        if let Some(content_type) = &resume.content_type {
            file = file.mime_str(content_type)?;
        }
        let form = Form::new()
            .text("payload", serde_json::to_string(payload)?)
            .part("resume", file);

        self.send_json(self.post(&["developer-applications"], None).multipart(form))
            .await
    }

    /// Where admins download an application's resume.
    pub fn resume_url(&self, application_id: &str) -> String {
        self.url(&["developer-applications", application_id, "resume"])
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::testing::spawn_backend;
    use axum::{
        extract::{Multipart, Path},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;

    #[tokio::test]
    async fn test_public_job_lookup() {
        let router = Router::new()
            .route(
                "/api/jobs",
                get(|| async { Json(json!({"items": [{"id": "1", "slug": "backend-intern", "title": "Backend Intern", "type": "job"}]})) }),
            )
            .route(
                "/api/jobs/:slug",
                get(|Path(slug): Path<String>| async move { Json(json!({"id": "1", "slug": slug, "title": "Backend Intern"})) }),
            );
        let client = spawn_backend(router).await;

        let jobs = client.public_jobs().await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].slug, "backend-intern");
        assert!(jobs[0].is_published);

        let job = client.public_job("backend-intern").await.unwrap();
        assert_eq!(job.title, "Backend Intern");
    }

    #[tokio::test]
    async fn test_post_application_sends_both_parts() {
        async fn accept(mut multipart: Multipart) -> Json<Value> {
            let mut payload = Value::Null;
            let mut resume_name = None;
            let mut resume_len = 0;
            while let Some(field) = multipart.next_field().await.unwrap() {
                match field.name() {
                    Some("payload") => {
                        payload = serde_json::from_str(&field.text().await.unwrap()).unwrap();
                    }
                    Some("resume") => {
                        resume_name = field.file_name().map(str::to_string);
                        resume_len = field.bytes().await.unwrap().len();
                    }
                    _ => {}
                }
            }
            Json(json!({"email": payload["email"], "xp": payload["xp"], "resume": resume_name, "len": resume_len}))
        }

        let client = spawn_backend(Router::new().route("/api/developer-applications", post(accept))).await;
        let payload = ApplicationPayload {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: "123".into(),
            college: "MIT".into(),
            grad_year: "2026".into(),
            linkedin: None,
            github: None,
            avatar: "pixel-2".into(),
            skills: vec!["Rust".into()],
            experience_years: 1.0,
            projects: "A compiler for a toy language".into(),
            strengths: vec![],
            weaknesses: vec![],
            persona: "Clean Code Paladin".into(),
            xp: 400,
            teaser_answer: None,
            job_slug: None,
        };
        let resume = ResumeUpload {
            file_name: "ada.pdf".into(),
            content_type: Some("application/pdf".into()),
            bytes: bytes::Bytes::from_static(b"%PDF-1.4"),
        };

        let echoed = client.post_application(&payload, &resume).await.unwrap();
        assert_eq!(echoed["email"], "ada@example.com");
        assert_eq!(echoed["xp"], 400);
        assert_eq!(echoed["resume"], "ada.pdf");
        assert_eq!(echoed["len"], 8);
    }
}
