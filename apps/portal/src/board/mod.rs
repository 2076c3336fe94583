//! Public job board: published postings shaped for listing and detail pages.

pub mod handlers;

use serde::Serialize;

use crate::models::job::{Job, JobType};

const DEFAULT_TEAM: &str = "Engineering";
const DEFAULT_EMPLOYMENT: &str = "Internship";
const DEFAULT_WORK_MODE: &str = "Remote";
const DEFAULT_DURATION: &str = "3 months";
const DEFAULT_APPLY_URL: &str = "/quest";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobCard {
    pub slug: String,
    pub title: String,
    pub badge: &'static str,
    pub team: String,
    pub employment_type: String,
    pub work_mode: String,
    pub location: Option<String>,
    pub stipend: Option<String>,
    pub internship_duration: String,
    pub short_description: Option<String>,
    pub deadline: Option<String>,
    pub event_date: Option<String>,
}

fn or_default(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

impl From<&Job> for JobCard {
    fn from(job: &Job) -> Self {
        Self {
            slug: job.slug.clone(),
            title: job.title.clone(),
            badge: match job.job_type {
                JobType::CampusEvent => "Campus Event",
                JobType::Job => "Job",
            },
            team: or_default(&job.team, DEFAULT_TEAM),
            employment_type: or_default(&job.employment_type, DEFAULT_EMPLOYMENT),
            work_mode: or_default(&job.work_mode, DEFAULT_WORK_MODE),
            location: job.location.clone(),
            stipend: job.stipend.clone(),
            internship_duration: or_default(&job.internship_duration, DEFAULT_DURATION),
            short_description: job.short_description.clone(),
            deadline: job.deadline.clone(),
            event_date: job.event_date.clone(),
        }
    }
}

/// Published postings only, in backend order.
pub fn published_cards(jobs: &[Job]) -> Vec<JobCard> {
    jobs.iter()
        .filter(|job| job.is_published)
        .map(JobCard::from)
        .collect()
}

/// Where the "Apply" button leads: the posting's application URL (or the
/// quest) tagged with `job=<slug>`.
pub fn apply_href(job: &Job) -> String {
    let base = or_default(&job.application_url, DEFAULT_APPLY_URL);
    let separator = if base.contains('?') { '&' } else { '?' };
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("job", &job.slug)
        .finish();
    format!("{base}{separator}{query}")
}

#[derive(Debug, Clone, Serialize)]
pub struct JobDetail {
    #[serde(flatten)]
    pub card: JobCard,
    pub full_description: Option<String>,
    pub role_overview: Option<String>,
    pub requirements: Vec<String>,
    pub bonus: Vec<String>,
    pub apply_href: String,
}

impl From<&Job> for JobDetail {
    fn from(job: &Job) -> Self {
        Self {
            card: JobCard::from(job),
            full_description: job.full_description.clone(),
            role_overview: job.role_overview.clone(),
            requirements: job.requirements.clone(),
            bonus: job.bonus.clone(),
            apply_href: apply_href(job),
        }
    }
}
