use serde::{Deserialize, Serialize};

/// A Developer Quest submission as listed and opened in the admin console.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub grad_year: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub avatar: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: Option<f64>,
    pub projects: Option<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub persona: Option<String>,
    pub xp: Option<u32>,
    pub teaser_answer: Option<String>,
    pub job_slug: Option<String>,
    pub created_at: Option<String>,
}

/// The `payload` part of `POST /developer-applications`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub grad_year: String,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub avatar: String,
    pub skills: Vec<String>,
    pub experience_years: f64,
    pub projects: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub persona: String,
    pub xp: u32,
    pub teaser_answer: Option<String>,
    pub job_slug: Option<String>,
}

/// Resume file sent alongside the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: bytes::Bytes,
}
