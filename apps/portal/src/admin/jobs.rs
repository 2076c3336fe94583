//! Editable job posting draft used by the jobs panel.

use serde::{Deserialize, Serialize};

use crate::bullets::{parse_bullets, to_bullets_text, JOB_FORM_BULLET_CAP, LEGACY_JOB_FORM_BULLET_CAP};
use crate::models::job::{Job, JobPayload, JobType};

const SLUG_MAX_LEN: usize = 120;
const DEFAULT_APPLICATION_URL: &str = "/quest";

/// Which job form produced the draft. The legacy form caps bullets at 20 and
/// has no role overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobForm {
    #[default]
    Current,
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDraft {
    pub id: Option<String>,
    pub title: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub team: String,
    pub employment_type: String,
    pub work_mode: String,
    pub location: String,
    pub stipend: String,
    pub internship_duration: String,
    pub short_description: String,
    pub full_description: String,
    pub role_overview: String,
    pub requirements_text: String,
    pub bonus_text: String,
    pub deadline: String,
    pub event_date: String,
    pub application_url: String,
    pub is_published: bool,
    pub form: JobForm,
}

impl Default for JobDraft {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            slug: String::new(),
            job_type: JobType::CampusEvent,
            team: "Engineering".into(),
            employment_type: "Internship".into(),
            work_mode: "Remote".into(),
            location: String::new(),
            stipend: String::new(),
            internship_duration: "3 months".into(),
            short_description: String::new(),
            full_description: String::new(),
            role_overview: String::new(),
            requirements_text: "- ".into(),
            bonus_text: "- ".into(),
            deadline: String::new(),
            event_date: String::new(),
            application_url: DEFAULT_APPLICATION_URL.into(),
            is_published: true,
            form: JobForm::Current,
        }
    }
}

impl JobDraft {
    pub fn from_job(job: &Job) -> Self {
        let base = Self::default();
        let or = |value: &Option<String>, default: String| {
            value.clone().filter(|v| !v.is_empty()).unwrap_or(default)
        };
        Self {
            id: Some(job.id.clone()),
            title: job.title.clone(),
            slug: job.slug.clone(),
            job_type: job.job_type,
            team: or(&job.team, base.team),
            employment_type: or(&job.employment_type, base.employment_type),
            work_mode: or(&job.work_mode, base.work_mode),
            location: job.location.clone().unwrap_or_default(),
            stipend: job.stipend.clone().unwrap_or_default(),
            internship_duration: or(&job.internship_duration, base.internship_duration),
            short_description: job.short_description.clone().unwrap_or_default(),
            full_description: job.full_description.clone().unwrap_or_default(),
            role_overview: job.role_overview.clone().unwrap_or_default(),
            requirements_text: to_bullets_text(&job.requirements),
            bonus_text: to_bullets_text(&job.bonus),
            deadline: job.deadline.clone().unwrap_or_default(),
            event_date: job.event_date.clone().unwrap_or_default(),
            application_url: or(&job.application_url, base.application_url),
            is_published: job.is_published,
            form: JobForm::Current,
        }
    }

    pub fn bullet_cap(&self) -> usize {
        match self.form {
            JobForm::Current => JOB_FORM_BULLET_CAP,
            JobForm::Legacy => LEGACY_JOB_FORM_BULLET_CAP,
        }
    }

    /// Builds the request body. A blank slug is derived from the title.
    pub fn payload(&self) -> JobPayload {
        let cap = self.bullet_cap();
        let slug = if self.slug.trim().is_empty() {
            slugify(&self.title)
        } else {
            self.slug.trim().to_string()
        };
        let role_overview = match self.form {
            JobForm::Current => Some(self.role_overview.clone()),
            JobForm::Legacy => None,
        };
        let application_url = match self.application_url.trim() {
            "" => DEFAULT_APPLICATION_URL.to_string(),
            url => url.to_string(),
        };
        JobPayload {
            title: self.title.trim().to_string(),
            slug,
            job_type: self.job_type,
            team: self.team.clone(),
            employment_type: self.employment_type.clone(),
            work_mode: self.work_mode.clone(),
            location: non_empty(&self.location),
            stipend: self.stipend.clone(),
            internship_duration: self.internship_duration.clone(),
            short_description: self.short_description.clone(),
            full_description: self.full_description.clone(),
            role_overview,
            requirements: parse_bullets(&self.requirements_text, cap),
            bonus: parse_bullets(&self.bonus_text, cap),
            deadline: non_empty(&self.deadline),
            event_date: non_empty(&self.event_date),
            application_url,
            is_published: self.is_published,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single dash, trims dashes, and caps the result at 120 characters.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for ch in value.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    slug.truncate(SLUG_MAX_LEN);
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("  Backend Intern (2025)! "), "backend-intern-2025");
        assert_eq!(slugify("C++ / Rust -- Systems"), "c-rust-systems");
        assert_eq!(slugify("***"), "");
        assert_eq!(slugify(&"a".repeat(200)).len(), 120);
    }

    #[test]
    fn test_slugify_never_ends_with_dash_after_truncation() {
        let title = format!("{} b", "a".repeat(119));
        assert_eq!(slugify(&title), "a".repeat(119));
    }

    #[test]
    fn test_empty_fields_become_null() {
        let draft = JobDraft {
            title: "Campus Drive".into(),
            application_url: "  ".into(),
            ..Default::default()
        };
        let payload = draft.payload();
        assert_eq!(payload.slug, "campus-drive");
        assert_eq!(payload.location, None);
        assert_eq!(payload.deadline, None);
        assert_eq!(payload.event_date, None);
        assert_eq!(payload.application_url, "/quest");
        assert!(payload.requirements.is_empty());
    }

    #[test]
    fn test_legacy_form_caps_bullets_and_drops_overview() {
        let text: String = (0..40).map(|i| format!("- item {i}\n")).collect();
        let mut draft = JobDraft {
            title: "Job".into(),
            requirements_text: text.clone(),
            role_overview: "overview".into(),
            ..Default::default()
        };
        assert_eq!(draft.payload().requirements.len(), 30);
        assert_eq!(draft.payload().role_overview.as_deref(), Some("overview"));

        draft.form = JobForm::Legacy;
        assert_eq!(draft.payload().requirements.len(), 20);
        let json = serde_json::to_value(draft.payload()).unwrap();
        assert!(json.get("role_overview").is_none());
    }

    #[test]
    fn test_from_job_fills_display_defaults() {
        let job = Job {
            id: "j-1".into(),
            title: "SDE Intern".into(),
            slug: "sde-intern".into(),
            requirements: vec!["Rust".into()],
            is_published: false,
            ..Default::default()
        };
        let draft = JobDraft::from_job(&job);
        assert_eq!(draft.id.as_deref(), Some("j-1"));
        assert_eq!(draft.team, "Engineering");
        assert_eq!(draft.work_mode, "Remote");
        assert_eq!(draft.requirements_text, "- Rust");
        assert_eq!(draft.bonus_text, "- ");
        assert!(!draft.is_published);
    }
}
