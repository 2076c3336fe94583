//! The Developer Quest flow: hero → persona quiz → levels 1..5 → success.
//!
//! `Wizard` is a plain value. The browser holds it between requests and
//! sends it back with the next action; every transition is a method on it.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::catalog::{is_known_answer, is_known_avatar, DEFAULT_AVATAR, PERSONA_QUIZ};
use super::scoring::{compute_xp, pick_persona, quiz_unlock_xp, Persona, QuizAnswers, XpInputs};
use crate::bullets::{parse_bullets, WIZARD_BULLET_CAP};
use crate::models::application::{ApplicationPayload, ResumeUpload};

pub const FIRST_LEVEL: u8 = 1;
pub const LAST_LEVEL: u8 = 5;
/// Quiz screen plus the five levels.
const TOTAL_STEPS: u32 = 1 + LAST_LEVEL as u32;
const XP_TOAST_THRESHOLD: u32 = 60;
const MIN_PROJECTS_CHARS: usize = 20;
const MIN_STRENGTHS: usize = 3;
const MIN_WEAKNESSES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Hero,
    Quiz,
    Wizard,
    Success,
}

/// What the browser knows about the chosen resume before uploading it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeMeta {
    pub file_name: String,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub grad_year: String,
    pub linkedin: String,
    pub github: String,
    pub avatar: String,
    pub skills: Vec<String>,
    pub experience_years: f64,
    pub projects: String,
    pub resume: Option<ResumeMeta>,
    pub strengths_text: String,
    pub weaknesses_text: String,
    pub teaser_answer: String,
}

impl Default for QuestForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            college: String::new(),
            grad_year: String::new(),
            linkedin: String::new(),
            github: String::new(),
            avatar: DEFAULT_AVATAR.to_string(),
            skills: Vec::new(),
            experience_years: 0.0,
            projects: String::new(),
            resume: None,
            strengths_text: "- ".to_string(),
            weaknesses_text: "- ".to_string(),
            teaser_answer: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitState {
    pub status: SubmitStatus,
    pub error: Option<String>,
    pub result: Option<Value>,
}

/// A short toast-style message for the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    fn new(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
        }
    }
}

/// Field name → validation message for the current level.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardAction {
    Start,
    Answer { question_id: String, key: String },
    FinishQuiz,
    BackToHero,
    BackToQuiz,
    Next,
    Back,
    Reset,
}

/// Where finished applications go.
#[async_trait]
pub trait ApplicationSink: Send + Sync {
    /// Returns the backend's acknowledgement, or a display-ready error.
    async fn submit_application(
        &self,
        payload: &ApplicationPayload,
        resume: &ResumeUpload,
    ) -> Result<Value, String>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wizard {
    pub screen: Screen,
    pub level: u8,
    pub quiz_answers: QuizAnswers,
    pub form: QuestForm,
    pub errors: FieldErrors,
    pub submit_state: SubmitState,
    pub job_slug: Option<String>,
    level_start_xp: u32,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Wizard {
    /// A fresh quest, optionally tagged with the posting it was opened from.
    pub fn new(job_slug: Option<String>) -> Self {
        let mut wizard = Self {
            screen: Screen::Hero,
            level: FIRST_LEVEL,
            quiz_answers: QuizAnswers::new(),
            form: QuestForm::default(),
            errors: FieldErrors::new(),
            submit_state: SubmitState::default(),
            job_slug: job_slug.filter(|s| !s.trim().is_empty()),
            level_start_xp: 0,
        };
        wizard.level_start_xp = wizard.xp();
        wizard
    }

    /// Brings a wizard received from the browser back inside what the quest
    /// can produce: level within 1..=5, catalog quiz answers, catalog avatar.
    pub fn sanitize(&mut self) {
        self.level = self.level.clamp(FIRST_LEVEL, LAST_LEVEL);
        self.quiz_answers
            .retain(|id, key| is_known_answer(id, key));
        if !is_known_avatar(&self.form.avatar) {
            self.form.avatar = DEFAULT_AVATAR.to_string();
        }
        self.level_start_xp = self.level_start_xp.min(self.xp());
    }

    pub fn persona(&self) -> Persona {
        pick_persona(&self.quiz_answers)
    }

    pub fn xp(&self) -> u32 {
        compute_xp(&XpInputs {
            quiz_answers: Some(&self.quiz_answers),
            skills: &self.form.skills,
            experience_years: self.form.experience_years,
            strengths_text: &self.form.strengths_text,
            weaknesses_text: &self.form.weaknesses_text,
            projects: &self.form.projects,
            teaser_answer: &self.form.teaser_answer,
        })
    }

    /// Percentage of the six steps completed.
    pub fn progress(&self) -> u32 {
        let step = match self.screen {
            Screen::Hero => 0,
            Screen::Quiz => 1,
            Screen::Wizard => 1 + u32::from(self.level),
            Screen::Success => TOTAL_STEPS,
        };
        ((f64::from(step) / f64::from(TOTAL_STEPS)) * 100.0).round() as u32
    }

    pub fn apply(&mut self, action: WizardAction) -> Option<Notice> {
        match action {
            WizardAction::Start => {
                self.start();
                None
            }
            WizardAction::Answer { question_id, key } => {
                self.answer(&question_id, &key);
                None
            }
            WizardAction::FinishQuiz => Some(self.finish_quiz()),
            WizardAction::BackToHero => {
                self.back_to_hero();
                None
            }
            WizardAction::BackToQuiz => {
                self.back_to_quiz();
                None
            }
            WizardAction::Next => self.next(),
            WizardAction::Back => {
                self.back();
                None
            }
            WizardAction::Reset => {
                *self = Wizard::new(self.job_slug.take());
                None
            }
        }
    }

    pub fn start(&mut self) {
        if self.screen == Screen::Hero {
            self.screen = Screen::Quiz;
        }
    }

    /// Records a quiz answer; unknown questions and option keys are ignored.
    pub fn answer(&mut self, question_id: &str, key: &str) -> bool {
        if self.screen != Screen::Quiz || !is_known_answer(question_id, key) {
            return false;
        }
        self.quiz_answers
            .insert(question_id.to_string(), key.to_string());
        true
    }

    pub fn all_quiz_answered(&self) -> bool {
        PERSONA_QUIZ
            .iter()
            .all(|q| {
                self.quiz_answers
                    .get(q.id)
                    .is_some_and(|key| is_known_answer(q.id, key))
            })
    }

    pub fn finish_quiz(&mut self) -> Notice {
        if self.screen != Screen::Quiz || !self.all_quiz_answered() {
            return Notice::new(
                "Pick all four",
                "Answer the quiz to unlock your persona badge.",
            );
        }
        self.screen = Screen::Wizard;
        self.level = FIRST_LEVEL;
        self.errors.clear();
        self.level_start_xp = self.xp();
        Notice::new(
            "Persona unlocked",
            format!(
                "You are a {}. +{} base XP!",
                self.persona().label(),
                quiz_unlock_xp(PERSONA_QUIZ.len())
            ),
        )
    }

    pub fn back_to_hero(&mut self) {
        if self.screen == Screen::Quiz {
            self.screen = Screen::Hero;
        }
    }

    pub fn back_to_quiz(&mut self) {
        if self.screen == Screen::Wizard && self.level == FIRST_LEVEL {
            self.errors.clear();
            self.screen = Screen::Quiz;
        }
    }

    /// Advances one level when the current level validates.
    pub fn next(&mut self) -> Option<Notice> {
        if self.screen != Screen::Wizard {
            return None;
        }

        let errors = self.validate_level(self.level);
        if !errors.is_empty() {
            self.errors = errors;
            return Some(Notice::new(
                "Almost there",
                "Fix the highlighted fields to unlock the next level.",
            ));
        }

        let xp = self.xp();
        let gained = xp.saturating_sub(self.level_start_xp);
        self.level = self.level.saturating_add(1).clamp(FIRST_LEVEL, LAST_LEVEL);
        self.level_start_xp = xp;
        self.errors.clear();

        (gained >= XP_TOAST_THRESHOLD).then(|| Notice::new("Awesome!", format!("+{gained} XP earned.")))
    }

    /// Steps back one level; never blocked.
    pub fn back(&mut self) {
        if self.screen != Screen::Wizard {
            return;
        }
        self.errors.clear();
        self.level = self.level.saturating_sub(1).clamp(FIRST_LEVEL, LAST_LEVEL);
        self.level_start_xp = self.xp();
    }

    pub fn validate_level(&self, level: u8) -> FieldErrors {
        let form = &self.form;
        let mut errors = FieldErrors::new();
        let mut require = |failed: bool, field: &str, message: &str| {
            if failed {
                errors.insert(field.to_string(), message.to_string());
            }
        };

        match level {
            1 => {
                require(form.name.trim().is_empty(), "name", "Name is required");
                require(!form.email.contains('@'), "email", "Enter a valid email");
                require(form.phone.trim().is_empty(), "phone", "Phone is required");
                require(form.college.trim().is_empty(), "college", "College is required");
                require(
                    form.grad_year.trim().is_empty(),
                    "grad_year",
                    "Graduation year is required",
                );
            }
            2 => {
                require(form.skills.is_empty(), "skills", "Pick at least one skill");
                require(
                    form.projects.trim().chars().count() < MIN_PROJECTS_CHARS,
                    "projects",
                    "Tell us about at least one key project (20+ chars)",
                );
                require(form.resume.is_none(), "resume", "Resume is required");
            }
            3 => {
                require(
                    self.strengths().len() < MIN_STRENGTHS,
                    "strengths_text",
                    "Add at least 3 bullets",
                );
            }
            4 => {
                require(
                    self.weaknesses().len() < MIN_WEAKNESSES,
                    "weaknesses_text",
                    "Add at least 2 bullets",
                );
            }
            _ => {}
        }

        errors
    }

    /// Validates every level up to and including `last`, stopping at the
    /// first level that fails. Returns that level and its errors.
    pub fn validate_through(&self, last: u8) -> Option<(u8, FieldErrors)> {
        (FIRST_LEVEL..=last)
            .map(|level| (level, self.validate_level(level)))
            .find(|(_, errors)| !errors.is_empty())
    }

    pub fn strengths(&self) -> Vec<String> {
        parse_bullets(&self.form.strengths_text, WIZARD_BULLET_CAP)
    }

    pub fn weaknesses(&self) -> Vec<String> {
        parse_bullets(&self.form.weaknesses_text, WIZARD_BULLET_CAP)
    }

    /// The `payload` part of the submission; persona and XP are derived here,
    /// never taken from the browser.
    pub fn payload(&self) -> ApplicationPayload {
        let form = &self.form;
        ApplicationPayload {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            college: form.college.trim().to_string(),
            grad_year: form.grad_year.trim().to_string(),
            linkedin: non_blank(&form.linkedin),
            github: non_blank(&form.github),
            avatar: form.avatar.clone(),
            skills: form.skills.clone(),
            experience_years: form.experience_years,
            projects: form.projects.trim().to_string(),
            strengths: self.strengths(),
            weaknesses: self.weaknesses(),
            persona: self.persona().label().to_string(),
            xp: self.xp(),
            teaser_answer: non_blank(&form.teaser_answer),
            job_slug: self.job_slug.clone(),
        }
    }

    /// Sends the application from the final level. On success the quest moves
    /// to the success screen; on failure it stays on level 5 with the error.
    pub async fn submit<S>(&mut self, sink: &S, resume: &ResumeUpload) -> Option<Notice>
    where
        S: ApplicationSink + ?Sized,
    {
        if self.screen != Screen::Wizard || self.level != LAST_LEVEL {
            return None;
        }

        let errors = self.validate_level(LAST_LEVEL);
        if !errors.is_empty() {
            self.errors = errors;
            return Some(Notice::new(
                "Quest blocked",
                "Finish the finale fields before submitting.",
            ));
        }

        self.submit_state = SubmitState {
            status: SubmitStatus::Submitting,
            error: None,
            result: None,
        };

        match sink.submit_application(&self.payload(), resume).await {
            Ok(result) => {
                self.submit_state = SubmitState {
                    status: SubmitStatus::Success,
                    error: None,
                    result: Some(result),
                };
                self.screen = Screen::Success;
                None
            }
            Err(message) => {
                self.submit_state = SubmitState {
                    status: SubmitStatus::Error,
                    error: Some(message.clone()),
                    result: None,
                };
                Some(Notice::new("Submission failed", message))
            }
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
