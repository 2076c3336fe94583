use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Job,
    #[default]
    CampusEvent,
}

/// A job posting or campus hiring event as stored by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub team: Option<String>,
    pub employment_type: Option<String>,
    pub work_mode: Option<String>,
    pub location: Option<String>,
    pub stipend: Option<String>,
    pub internship_duration: Option<String>,
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    pub role_overview: Option<String>,
    pub requirements: Vec<String>,
    pub bonus: Vec<String>,
    pub deadline: Option<String>,
    pub event_date: Option<String>,
    pub application_url: Option<String>,
    #[serde(default = "published_by_default")]
    pub is_published: bool,
}

fn published_by_default() -> bool {
    true
}

/// Body of `POST /admin/jobs` and `PUT /admin/jobs/:id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobPayload {
    pub title: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub team: String,
    pub employment_type: String,
    pub work_mode: String,
    pub location: Option<String>,
    pub stipend: String,
    pub internship_duration: String,
    pub short_description: String,
    pub full_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_overview: Option<String>,
    pub requirements: Vec<String>,
    pub bonus: Vec<String>,
    pub deadline: Option<String>,
    pub event_date: Option<String>,
    pub application_url: String,
    pub is_published: bool,
}
